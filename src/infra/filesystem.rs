//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
///
/// Returns `false` when there was nothing to remove.
pub fn remove_dir_all(path: &Path) -> Result<bool, FilesystemError> {
    if !path.exists() {
        return Ok(false);
    }
    std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;
    Ok(true)
}

/// Every entry directly inside `dir`, sorted by file name
pub fn list_entries(dir: &Path) -> Result<Vec<PathBuf>, FilesystemError> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            entry
                .map(walkdir::DirEntry::into_path)
                .map_err(|e| FilesystemError::ReadDir {
                    path: dir.to_path_buf(),
                    error: e.to_string(),
                })
        })
        .collect()
}

/// Move a file, replacing any existing file at the destination
///
/// Falls back to copy and remove when `from` and `to` live on different
/// filesystems.
pub fn rename(from: &Path, to: &Path) -> Result<(), FilesystemError> {
    let rename_error = |e: std::io::Error| FilesystemError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        error: e.to_string(),
    };
    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => copy_and_remove(from, to).map_err(rename_error),
        Err(e) => Err(rename_error(e)),
    }
}

fn copy_and_remove(from: &Path, to: &Path) -> std::io::Result<()> {
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}

// EXDEV on Linux and macOS, ERROR_NOT_SAME_DEVICE on Windows
fn is_cross_device(error: &std::io::Error) -> bool {
    const CROSS_DEVICE: i32 = if cfg!(windows) { 17 } else { 18 };
    error.raw_os_error() == Some(CROSS_DEVICE)
}
