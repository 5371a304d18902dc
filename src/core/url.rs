//! Platform-specific URLs
//!
//! Release assets are usually named with a platform-specific fragment that
//! does not follow the toolchain's own naming (`osx-x86_64` rather than
//! `darwin/amd64`). A [`PlatformSpecificUrl`] holds a pattern with `%s`
//! placeholders and, per `platform/architecture` key, the strings that fill
//! them in order.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::core::platform::BuildContext;

/// A URL pattern whose placeholders depend on the build context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformSpecificUrl {
    /// Pattern containing `%s` placeholders
    pub pattern: String,
    /// Substitutions keyed by `platform/architecture`
    pub substrings: BTreeMap<String, Vec<String>>,
}

impl PlatformSpecificUrl {
    /// Create a URL with no known contexts
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            substrings: BTreeMap::new(),
        }
    }

    /// Register the substitutions for a `platform/architecture` key
    #[must_use]
    pub fn with_context<I>(mut self, key: impl Into<String>, substrings: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.substrings
            .insert(key.into(), substrings.into_iter().map(Into::into).collect());
        self
    }

    /// Contexts this URL can be resolved for
    pub fn contexts(&self) -> impl Iterator<Item = &str> {
        self.substrings.keys().map(String::as_str)
    }

    /// Resolve the URL for a context
    ///
    /// Returns `None` if the context is unknown or supplies fewer strings
    /// than the pattern has placeholders. Surplus strings are ignored.
    pub fn resolve(&self, context: &BuildContext) -> Option<String> {
        let substrings = self.substrings.get(&context.key())?;

        let placeholders = placeholder_pattern().find_iter(&self.pattern).count();
        if substrings.len() < placeholders {
            return None;
        }

        let mut next = substrings.iter();
        let resolved = placeholder_pattern().replace_all(&self.pattern, |_: &Captures<'_>| {
            next.next().cloned().unwrap_or_default()
        });
        Some(resolved.into_owned())
    }

    /// Resolve the URL for the host context
    pub fn resolve_for_host(&self) -> Option<String> {
        self.resolve(&BuildContext::host())
    }
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("%s").expect("Invalid placeholder pattern"))
}
