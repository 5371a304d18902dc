//! Project configuration
//!
//! Reads `crossbin.toml` from the module root. Every section is optional;
//! a missing file is the same as an empty one.
//!
//! ```toml
//! [toolchain]
//! command = "go"
//!
//! [build]
//! tags = ["netgo"]
//! scheme = "suffixed-filenames"
//! flags = ["-trimpath"]
//!
//! [matrix]
//! platforms = ["linux", "windows", "darwin"]
//! architectures = ["amd64", "arm64"]
//! ignore = ["windows/arm64"]
//!
//! [codegen]
//! tools = ["google.golang.org/protobuf/cmd/protoc-gen-go@v1.28.0"]
//! protoc = "3.19.4"
//!
//! [[download]]
//! url = "https://example.com/assets/data.bin"
//! filename = "data.bin"
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::core::matrix::BuildMatrix;
use crate::core::module::Module;
use crate::core::naming::NamingScheme;
use crate::core::options::BuildOptions;
use crate::error::ConfigError;
use crate::infra::toolchain::Toolchain;

/// Contents of `crossbin.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Toolchain settings
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Default build options
    #[serde(default)]
    pub build: BuildConfig,

    /// Matrix used by `build --matrix`
    #[serde(default)]
    pub matrix: Option<BuildMatrix>,

    /// Code generation settings
    #[serde(default)]
    pub codegen: CodegenConfig,

    /// Files fetched by `download --all`
    #[serde(default, rename = "download")]
    pub downloads: Vec<DownloadConfig>,
}

/// Toolchain settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Toolchain driver program
    pub command: Option<String>,
}

/// Default build options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Build tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Naming scheme
    pub scheme: Option<NamingScheme>,

    /// Additional toolchain flags
    #[serde(default)]
    pub flags: Vec<String>,

    /// Output directory, relative to the module root
    pub out_dir: Option<PathBuf>,
}

/// Code generation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodegenConfig {
    /// Tools to install before generating
    #[serde(default)]
    pub tools: Vec<String>,

    /// protoc release to fetch into the download cache
    pub protoc: Option<String>,
}

/// A file to download into the module's cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Source URL
    pub url: String,

    /// Local file name (derived from the URL when absent)
    pub filename: Option<String>,
}

impl ProjectConfig {
    /// Load the project configuration of a module
    pub fn load(module: &Module) -> Result<Self, ConfigError> {
        Self::load_from_path(&module.root_dir().join(defaults::PROJECT_CONFIG_FILE))
    }

    /// Load project configuration from a specific path
    ///
    /// A missing file yields the default configuration.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No project config at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })?;
        tracing::debug!("Loaded project config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from(defaults::PROJECT_CONFIG_FILE),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject malformed ignore keys and warn about inert ones
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(matrix) = &self.matrix else {
            return Ok(());
        };

        if let Some(bad) = matrix.ignore.iter().find(|key| !context_key_pattern().is_match(key)) {
            return Err(ConfigError::Invalid {
                message: format!("ignore entry '{bad}' is not of the form 'platform/architecture'"),
            });
        }

        for key in matrix.unmatched_ignores() {
            tracing::warn!("Ignore entry '{key}' does not match any platform/architecture pair");
        }

        Ok(())
    }

    /// Build options from the `[build]` section
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            tags: self.build.tags.clone(),
            scheme: self.build.scheme.unwrap_or_default(),
            flags: self.build.flags.clone(),
        }
    }

    /// Output directory from the `[build]` section, resolved against the module root
    pub fn out_dir(&self, module: &Module) -> Option<PathBuf> {
        self.build
            .out_dir
            .as_ref()
            .map(|dir| module.root_dir().join(dir))
    }

    /// Resolve the toolchain: environment override, then config, then default
    pub fn toolchain(&self) -> Toolchain {
        self.toolchain_with_override(std::env::var(defaults::ENV_TOOLCHAIN).ok())
    }

    fn toolchain_with_override(&self, env_override: Option<String>) -> Toolchain {
        env_override
            .filter(|command| !command.is_empty())
            .or_else(|| self.toolchain.command.clone())
            .map_or_else(Toolchain::default, Toolchain::new)
    }
}

fn context_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]+/[A-Za-z0-9_]+$").expect("Invalid context key pattern")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"
[toolchain]
command = "go1.21"

[build]
tags = ["netgo", "osusergo"]
scheme = "suffixed-filenames"
flags = ["-trimpath"]
out_dir = "dist"

[matrix]
platforms = ["linux", "windows"]
architectures = ["amd64", "arm64"]
ignore = ["windows/arm64"]

[codegen]
tools = ["google.golang.org/protobuf/cmd/protoc-gen-go@v1.28.0"]
protoc = "3.19.4"

[[download]]
url = "https://example.com/assets/data.bin"

[[download]]
url = "https://example.com/assets/latest"
filename = "schema.json"
"#;

    #[test]
    fn test_parse_full_config() {
        let config = ProjectConfig::from_toml(FULL_CONFIG).unwrap();

        assert_eq!(config.toolchain.command.as_deref(), Some("go1.21"));
        let options = config.build_options();
        assert_eq!(options.scheme, NamingScheme::SuffixedFilenames);
        assert_eq!(options.joined_tags(), "netgo,osusergo");
        assert_eq!(options.flags, vec!["-trimpath".to_string()]);

        let matrix = config.matrix.as_ref().unwrap();
        assert_eq!(matrix.contexts().len(), 3);

        assert_eq!(config.codegen.tools.len(), 1);
        assert_eq!(config.codegen.protoc.as_deref(), Some("3.19.4"));
        assert_eq!(config.downloads.len(), 2);
        assert_eq!(config.downloads[1].filename.as_deref(), Some("schema.json"));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = ProjectConfig::from_toml("").unwrap();
        assert_eq!(config, ProjectConfig::default());
        assert_eq!(config.build_options().scheme, NamingScheme::Undecorated);
    }

    #[test]
    fn test_unknown_scheme_fails() {
        let result = ProjectConfig::from_toml("[build]\nscheme = \"suffixed\"\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_malformed_ignore_fails() {
        let result = ProjectConfig::from_toml(
            "[matrix]\nplatforms = [\"linux\"]\narchitectures = [\"amd64\"]\nignore = [\"linux-amd64\"]\n",
        );
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_missing_file_is_default() {
        let temp = TempDir::new().unwrap();
        let config = ProjectConfig::load_from_path(&temp.path().join("crossbin.toml")).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("crossbin.toml");
        std::fs::write(&path, "[build\n").unwrap();

        match ProjectConfig::load_from_path(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Parse error, got: {other:?}"),
        }
    }

    #[test]
    fn test_out_dir_is_relative_to_module() {
        let temp = TempDir::new().unwrap();
        let module = Module::new(temp.path()).unwrap();
        let config = ProjectConfig::from_toml(FULL_CONFIG).unwrap();
        assert_eq!(config.out_dir(&module), Some(temp.path().join("dist")));
    }

    #[test]
    fn test_toolchain_precedence() {
        let config = ProjectConfig::from_toml(FULL_CONFIG).unwrap();
        assert_eq!(
            config
                .toolchain_with_override(Some("/opt/go/bin/go".to_string()))
                .command(),
            "/opt/go/bin/go"
        );
        assert_eq!(config.toolchain_with_override(None).command(), "go1.21");
        assert_eq!(
            ProjectConfig::default()
                .toolchain_with_override(Some(String::new()))
                .command(),
            "go"
        );
    }
}
