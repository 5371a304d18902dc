//! Module descriptor
//!
//! A module is a source tree root. Every directory the build helpers touch is
//! derived from it:
//!
//! ```text
//! <root>/bin/                                  final binaries
//! <root>/.build/staging/<platform>/<arch>/     transient, suffixed scheme only
//! <root>/.build/tools/<platform>/<arch>/       installed codegen tools (host)
//! <root>/.build/downloads/<platform>/<arch>/   cached downloads
//! ```

use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::core::platform::BuildContext;
use crate::error::FilesystemError;

/// A source module rooted at an absolute directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    root_dir: PathBuf,
}

impl Module {
    /// Create a module for an absolute root directory
    ///
    /// Relative paths are resolved against the current working directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Result<Self, FilesystemError> {
        let root_dir = root_dir.into();
        if root_dir.is_absolute() {
            return Ok(Self { root_dir });
        }
        Ok(Self {
            root_dir: current_dir()?.join(root_dir),
        })
    }

    /// Create a module for the current working directory
    pub fn in_cwd() -> Result<Self, FilesystemError> {
        Ok(Self {
            root_dir: current_dir()?,
        })
    }

    /// The module root
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory holding the built binaries
    pub fn binaries_dir(&self) -> PathBuf {
        self.root_dir.join(defaults::BINARIES_DIR)
    }

    /// Directory holding build-related scratch files
    pub fn build_dir(&self) -> PathBuf {
        self.root_dir.join(defaults::BUILD_DIR)
    }

    /// Staging directory for binaries awaiting suffix decoration
    pub fn staging_dir(&self, context: &BuildContext) -> PathBuf {
        self.build_dir()
            .join(defaults::STAGING_SUBDIR)
            .join(&context.platform)
            .join(&context.architecture)
    }

    /// Download cache for the host context
    pub fn downloads_dir(&self) -> PathBuf {
        self.downloads_dir_for(&BuildContext::host())
    }

    /// Download cache for an explicit context
    pub fn downloads_dir_for(&self, context: &BuildContext) -> PathBuf {
        self.build_dir()
            .join(defaults::DOWNLOADS_SUBDIR)
            .join(&context.platform)
            .join(&context.architecture)
    }

    /// Install location for codegen tools, which always run on the host
    pub fn codegen_tools_dir(&self) -> PathBuf {
        let host = BuildContext::host();
        self.build_dir()
            .join(defaults::TOOLS_SUBDIR)
            .join(host.platform)
            .join(host.architecture)
    }
}

fn current_dir() -> Result<PathBuf, FilesystemError> {
    std::env::current_dir().map_err(|e| FilesystemError::CurrentDir {
        error: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn module() -> (TempDir, Module) {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let module = Module::new(temp.path()).unwrap();
        (temp, module)
    }

    #[test]
    fn test_derived_directories() {
        let (temp, module) = module();
        let root = temp.path();
        assert_eq!(module.binaries_dir(), root.join("bin"));
        assert_eq!(module.build_dir(), root.join(".build"));
        assert_eq!(
            module.staging_dir(&BuildContext::new("windows", "amd64")),
            root.join(".build/staging/windows/amd64")
        );
        assert_eq!(
            module.downloads_dir_for(&BuildContext::new("linux", "arm64")),
            root.join(".build/downloads/linux/arm64")
        );
    }

    #[test]
    fn test_host_scoped_directories() {
        let (temp, module) = module();
        let host = BuildContext::host();
        assert_eq!(
            module.downloads_dir(),
            temp.path()
                .join(".build/downloads")
                .join(&host.platform)
                .join(&host.architecture)
        );
        assert_eq!(
            module.codegen_tools_dir(),
            temp.path()
                .join(".build/tools")
                .join(&host.platform)
                .join(&host.architecture)
        );
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        let module = Module::new("some/relative/dir").unwrap();
        assert!(module.root_dir().is_absolute());
        assert!(module.root_dir().ends_with("some/relative/dir"));
    }

    #[test]
    fn test_in_cwd_is_absolute() {
        let module = Module::in_cwd().unwrap();
        assert!(module.root_dir().is_absolute());
    }
}
