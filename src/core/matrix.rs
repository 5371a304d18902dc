//! Build matrices
//!
//! A matrix is the Cartesian product of platforms and architectures minus an
//! ignore list of `platform/architecture` keys. Ignore entries that match no
//! pair are inert.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::platform::BuildContext;

/// Platforms x architectures, minus ignored pairs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildMatrix {
    /// Platforms, iterated in the outer loop
    #[serde(default)]
    pub platforms: Vec<String>,

    /// Architectures, iterated in the inner loop
    #[serde(default)]
    pub architectures: Vec<String>,

    /// `platform/architecture` keys to skip
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl BuildMatrix {
    /// Create a matrix with no ignored pairs
    pub fn new<P, A>(platforms: P, architectures: A) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            platforms: platforms.into_iter().map(Into::into).collect(),
            architectures: architectures.into_iter().map(Into::into).collect(),
            ignore: Vec::new(),
        }
    }

    /// Skip the given `platform/architecture` pair
    #[must_use]
    pub fn ignoring(mut self, key: impl Into<String>) -> Self {
        self.ignore.push(key.into());
        self
    }

    /// Whether the matrix produces no contexts at all
    pub fn is_empty(&self) -> bool {
        self.contexts().is_empty()
    }

    /// The contexts to build, platforms outer and architectures inner
    pub fn contexts(&self) -> Vec<BuildContext> {
        let ignored: HashSet<&str> = self.ignore.iter().map(String::as_str).collect();

        let mut contexts = Vec::new();
        for platform in &self.platforms {
            for architecture in &self.architectures {
                let context = BuildContext::new(platform.as_str(), architecture.as_str());
                if ignored.contains(context.key().as_str()) {
                    tracing::debug!("Skipping ignored context {context}");
                    continue;
                }
                contexts.push(context);
            }
        }
        contexts
    }

    /// Ignore entries that do not correspond to any pair in the matrix
    pub fn unmatched_ignores(&self) -> Vec<&str> {
        self.ignore
            .iter()
            .filter(|key| {
                BuildContext::parse(key).map_or(true, |ctx| {
                    !self.platforms.contains(&ctx.platform)
                        || !self.architectures.contains(&ctx.architecture)
                })
            })
            .map(String::as_str)
            .collect()
    }
}
