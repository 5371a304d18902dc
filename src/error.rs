//! Error types for crossbin
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::platform::BuildContext;

/// Subprocess execution errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// No program was supplied
    #[error("Cannot run an empty command")]
    EmptyCommand,

    /// PATH lookup for the program failed
    #[error("Executable '{name}' not found in PATH: {error}")]
    ExecutableNotFound { name: String, error: String },

    /// The child exited unsuccessfully
    #[error("Command [{command}] terminated with {}", exit_description(.code))]
    CommandFailed { command: String, code: Option<i32> },

    /// Spawning or waiting on the child failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "a signal".to_string(),
    }
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to create directory
    #[error("Failed to create directory '{path}': {error}")]
    CreateDir { path: PathBuf, error: String },

    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to list a directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },

    /// Failed to move a file into place
    #[error("Failed to rename '{from}' to '{to}': {error}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        error: String,
    },

    /// The working directory could not be resolved
    #[error("Failed to resolve the current working directory: {error}")]
    CurrentDir { error: String },
}

/// Build errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// Options that cannot produce a sane output layout
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Directory preparation or renaming failed
    #[error(transparent)]
    Filesystem(#[from] FilesystemError),

    /// The toolchain invocation failed
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// One context of a matrix build failed
    #[error("Build for {context} failed after {} completed context(s): {source}", .completed.len())]
    Context {
        context: BuildContext,
        completed: Vec<BuildContext>,
        source: Box<BuildError>,
    },
}

/// Download errors
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Network error
    #[error("Network error downloading '{url}': {error}")]
    NetworkError { url: String, error: String },

    /// Server answered with a non-success status
    #[error("Download of '{url}' failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// IO error
    #[error("IO error for '{path}': {error}")]
    IoError { path: PathBuf, error: String },
}

/// Project configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    Parse { path: PathBuf, error: String },

    /// Parsed but semantically invalid
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Top-level crossbin error type
#[derive(Error, Debug)]
pub enum CrossbinError {
    /// Process error
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),

    /// Build error
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Download error
    #[error("Download error: {0}")]
    Download(#[from] DownloadError),

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// Config error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
