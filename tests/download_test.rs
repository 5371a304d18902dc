//! Integration tests for `crossbin download`

mod common;

use common::TestProject;
use std::path::PathBuf;
use std::process::Output;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run crossbin without blocking the runtime serving the mock
async fn run(project: &TestProject, args: &[&str]) -> Output {
    tokio::process::Command::from(project.command(args))
        .output()
        .await
        .expect("Failed to execute crossbin download")
}

async fn downloads_dir(project: &TestProject) -> PathBuf {
    let output = run(project, &["dirs", "--json"]).await;
    let dirs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    PathBuf::from(dirs["downloads"].as_str().unwrap())
}

#[tokio::test]
async fn test_download_url_into_module_cache() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/assets/data.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"payload".to_vec()))
        .mount(&mock_server)
        .await;

    let project = TestProject::new();
    let url = format!("{}/assets/data.bin", mock_server.uri());

    let output = run(&project, &["download", &url]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let file = downloads_dir(&project).await.join("data.bin");
    assert_eq!(std::fs::read(file).unwrap(), b"payload");
}

#[tokio::test]
async fn test_download_configured_entries() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("first"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_string("second"))
        .mount(&mock_server)
        .await;

    let project = TestProject::new();
    project.create_file(
        "crossbin.toml",
        &format!(
            "[[download]]\nurl = \"{0}/a.txt\"\n\n[[download]]\nurl = \"{0}/latest\"\nfilename = \"b.txt\"\n",
            mock_server.uri()
        ),
    );

    let output = run(&project, &["download", "--json"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.as_array().unwrap().len(), 2);
    assert_eq!(reports[1]["size"], 6);

    let dir = downloads_dir(&project).await;
    assert_eq!(std::fs::read_to_string(dir.join("a.txt")).unwrap(), "first");
    assert_eq!(std::fs::read_to_string(dir.join("b.txt")).unwrap(), "second");
}

#[tokio::test]
async fn test_existing_download_is_skipped_unless_forced() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tool.zip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("zip"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let project = TestProject::new();
    let url = format!("{}/tool.zip", mock_server.uri());

    assert!(run(&project, &["download", &url]).await.status.success());

    let output = run(&project, &["download", &url, "--json"]).await;
    assert!(output.status.success());
    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["skipped"], true);

    assert!(run(&project, &["download", &url, "--force"]).await.status.success());
}

#[tokio::test]
async fn test_error_status_fails_without_leaving_a_file() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let project = TestProject::new();
    let url = format!("{}/missing.zip", mock_server.uri());

    let output = run(&project, &["download", &url]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("404"), "stderr: {stderr}");
    assert!(!downloads_dir(&project).await.join("missing.zip").exists());
}

#[tokio::test]
async fn test_global_download_lands_in_current_directory() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("notes"))
        .mount(&mock_server)
        .await;

    let project = TestProject::new();
    let url = format!("{}/notes.txt", mock_server.uri());

    let output = run(&project, &["download", &url, "--global", "--filename", "kept.txt"]).await;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(project.read_file("kept.txt"), "notes");
    assert!(!project.file_exists(".build"));
}

#[tokio::test]
async fn test_nothing_to_download() {
    let project = TestProject::new();

    let output = run(&project, &["download"]).await;

    assert!(!output.status.success());
}
