//! Clean logic
//!
//! Removes the directories a module's builds produce. Removal is idempotent:
//! a directory that is already gone is reported as skipped, not as an error.

use std::path::PathBuf;

use serde::Serialize;

use crate::core::module::Module;
use crate::error::FilesystemError;
use crate::infra::filesystem;

/// Which directories to remove
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanScope {
    /// Only the binaries directory
    Binaries,
    /// Only the build scratch directory
    Build,
    /// Both
    All,
}

/// Result of clean operation
#[derive(Debug, Default, Serialize)]
pub struct CleanResult {
    /// Directories that were removed
    pub removed: Vec<PathBuf>,
    /// Directories that didn't exist (skipped)
    pub skipped: Vec<PathBuf>,
}

impl CleanResult {
    fn record(&mut self, path: PathBuf, removed: bool) {
        if removed {
            self.removed.push(path);
        } else {
            self.skipped.push(path);
        }
    }
}

impl Module {
    /// Remove the binaries directory
    pub fn clean_binaries_dir(&self) -> Result<bool, FilesystemError> {
        filesystem::remove_dir_all(&self.binaries_dir())
    }

    /// Remove the build scratch directory, including staged files, tools and downloads
    pub fn clean_build_dir(&self) -> Result<bool, FilesystemError> {
        filesystem::remove_dir_all(&self.build_dir())
    }

    /// Remove the directories selected by `scope`
    pub fn clean(&self, scope: CleanScope) -> Result<CleanResult, FilesystemError> {
        let mut result = CleanResult::default();

        if matches!(scope, CleanScope::Binaries | CleanScope::All) {
            let removed = self.clean_binaries_dir()?;
            result.record(self.binaries_dir(), removed);
        }

        if matches!(scope, CleanScope::Build | CleanScope::All) {
            let removed = self.clean_build_dir()?;
            result.record(self.build_dir(), removed);
        }

        Ok(result)
    }

    /// Check if the module has anything to clean
    pub fn has_build_artifacts(&self) -> bool {
        self.binaries_dir().exists() || self.build_dir().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_module() -> (TempDir, Module) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let module = Module::new(temp.path()).unwrap();
        (temp, module)
    }

    #[test]
    fn test_clean_removes_binaries_directory() {
        let (_temp, module) = create_test_module();
        std::fs::create_dir_all(module.binaries_dir()).unwrap();
        std::fs::write(module.binaries_dir().join("tool"), "binary").unwrap();

        let result = module.clean(CleanScope::Binaries).unwrap();

        assert!(!module.binaries_dir().exists());
        assert_eq!(result.removed, vec![module.binaries_dir()]);
    }

    #[test]
    fn test_clean_build_leaves_binaries() {
        let (_temp, module) = create_test_module();
        std::fs::create_dir_all(module.binaries_dir()).unwrap();
        std::fs::create_dir_all(module.codegen_tools_dir()).unwrap();

        module.clean(CleanScope::Build).unwrap();

        assert!(!module.build_dir().exists());
        assert!(module.binaries_dir().exists());
    }

    #[test]
    fn test_clean_all_removes_both() {
        let (_temp, module) = create_test_module();
        std::fs::create_dir_all(module.binaries_dir()).unwrap();
        std::fs::create_dir_all(module.downloads_dir()).unwrap();

        let result = module.clean(CleanScope::All).unwrap();

        assert!(!module.has_build_artifacts());
        assert_eq!(result.removed.len(), 2);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let (_temp, module) = create_test_module();

        let first = module.clean(CleanScope::All).unwrap();
        let second = module.clean(CleanScope::All).unwrap();

        assert!(first.removed.is_empty());
        assert_eq!(second.skipped.len(), 2);
    }
}
