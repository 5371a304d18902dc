//! Integration tests for `crossbin protoc`

mod common;

use common::TestProject;

#[test]
fn test_prints_release_url_for_context() {
    let project = TestProject::new();

    let output = project.run(&[
        "protoc",
        "--release",
        "21.12",
        "--platform",
        "darwin",
        "--arch",
        "arm64",
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "https://github.com/protocolbuffers/protobuf/releases/download/v21.12/protoc-21.12-osx-aarch_64.zip"
    );
}

#[test]
fn test_release_from_config_json() {
    let project = TestProject::new();
    project.create_file("crossbin.toml", "[codegen]\nprotoc = \"3.19.4\"\n");

    let output = project.run(&["protoc", "--platform", "linux", "--arch", "386", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["release"], "3.19.4");
    assert_eq!(report["context"]["platform"], "linux");
    assert!(report["url"]
        .as_str()
        .unwrap()
        .ends_with("/v3.19.4/protoc-3.19.4-linux-x86_32.zip"));
}

#[test]
fn test_unsupported_context_fails() {
    let project = TestProject::new();

    let output = project.run(&[
        "protoc",
        "--release",
        "21.12",
        "--platform",
        "windows",
        "--arch",
        "arm64",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("windows/arm64"), "stderr: {stderr}");
}

#[test]
fn test_missing_release_fails() {
    let project = TestProject::new();

    let output = project.run(&["protoc"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--release"), "stderr: {stderr}");
}
