//! Build options

use serde::{Deserialize, Serialize};

use crate::core::naming::NamingScheme;

/// Options applied to every toolchain build invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Build tags, passed comma-joined via `-tags`
    #[serde(default)]
    pub tags: Vec<String>,

    /// How the build context is encoded in output names
    #[serde(default)]
    pub scheme: NamingScheme,

    /// Extra flags appended after `-tags`
    #[serde(default)]
    pub flags: Vec<String>,
}

impl BuildOptions {
    /// Create options with the given naming scheme and nothing else
    pub fn new(scheme: NamingScheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Add a build tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Append an additional toolchain flag
    #[must_use]
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    /// The `-tags` argument value
    pub fn joined_tags(&self) -> String {
        self.tags.join(",")
    }
}
