//! Build contexts
//!
//! A build context is one (platform, architecture) pair, spelled the way the
//! toolchain spells them (`GOOS`/`GOARCH` values such as `linux`/`amd64`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single platform/architecture pair to produce binaries for
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BuildContext {
    /// Target operating system (e.g. `linux`, `windows`, `darwin`)
    pub platform: String,
    /// Target CPU architecture (e.g. `amd64`, `arm64`)
    pub architecture: String,
}

impl BuildContext {
    /// Create a context from a platform and architecture
    pub fn new(platform: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            architecture: architecture.into(),
        }
    }

    /// The context of the machine running this process
    pub fn host() -> Self {
        Self::new(
            host_platform(std::env::consts::OS),
            host_architecture(std::env::consts::ARCH),
        )
    }

    /// Parse a `platform/architecture` key
    pub fn parse(key: &str) -> Option<Self> {
        let (platform, architecture) = key.split_once('/')?;
        if platform.is_empty() || architecture.is_empty() || architecture.contains('/') {
            return None;
        }
        Some(Self::new(platform, architecture))
    }

    /// The `platform/architecture` lookup key for this context
    pub fn key(&self) -> String {
        format!("{}/{}", self.platform, self.architecture)
    }
}

impl fmt::Display for BuildContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.architecture)
    }
}

/// Translate a Rust `std::env::consts::OS` value to the toolchain's name
fn host_platform(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Translate a Rust `std::env::consts::ARCH` value to the toolchain's name
fn host_architecture(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
