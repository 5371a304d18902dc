//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// Creates a temporary module directory and runs the crossbin binary
/// against it.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    #[allow(dead_code)]
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// A crossbin command rooted at this project
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_crossbin"));
        cmd.current_dir(self.path());
        cmd.arg("--root").arg(self.path());
        cmd.args(args);
        cmd.env_remove("CROSSBIN_TOOLCHAIN");
        cmd.env_remove("CROSSBIN_ROOT");
        cmd
    }

    /// Run crossbin with `args` against this project
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute crossbin")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Stand-in for the `go` driver
///
/// `build` writes an `app` binary (`app.exe` for windows) containing
/// `GOOS/GOARCH` into the `-o` directory, `install` drops an empty file named
/// after the tool into `GOBIN`, and `generate` records `PATH` in
/// `generated.txt`. Every call is appended to `$FAKE_GO_LOG`; a build whose
/// `GOOS/GOARCH` equals `$FAKE_GO_FAIL` exits 2.
#[allow(dead_code)]
pub const FAKE_GO: &str = r#"#!/bin/sh
echo "$GOOS/$GOARCH $*" >> "${FAKE_GO_LOG:-/dev/null}"
case "$1" in
  build)
    if [ "$GOOS/$GOARCH" = "$FAKE_GO_FAIL" ]; then
      echo "fake build failure" >&2
      exit 2
    fi
    ext=""
    if [ "$GOOS" = "windows" ]; then ext=".exe"; fi
    printf '%s/%s' "$GOOS" "$GOARCH" > "${3}app${ext}"
    ;;
  install)
    mkdir -p "$GOBIN"
    tool="${2%@*}"
    : > "$GOBIN/${tool##*/}"
    ;;
  generate)
    printf '%s' "$PATH" > generated.txt
    ;;
esac
"#;

/// Write [`FAKE_GO`] into `dir` as an executable and return its path
#[cfg(unix)]
#[allow(dead_code)]
pub fn install_fake_go(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-go");
    std::fs::write(&path, FAKE_GO).expect("Failed to write fake toolchain");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake toolchain executable");
    path
}

/// Sample project configuration for matrix builds
#[allow(dead_code)]
pub const SAMPLE_CONFIG: &str = r#"
[build]
tags = ["netgo"]
scheme = "suffixed-filenames"

[matrix]
platforms = ["linux", "windows"]
architectures = ["amd64", "arm64"]
ignore = ["windows/arm64"]
"#;
