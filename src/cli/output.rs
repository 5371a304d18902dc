//! Output formatting and progress indicators
//!
//! This module provides utilities for displaying progress bars,
//! status messages, and errors to the user.

use std::sync::OnceLock;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

static GLOBAL: OnceLock<OutputConfig> = OnceLock::new();

/// How command results are presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Suppress everything but errors
    pub quiet: bool,
    /// Emit machine-readable JSON on stdout
    pub json: bool,
}

impl OutputConfig {
    /// Create an output configuration from the global flags
    pub fn new(quiet: bool, json: bool) -> Self {
        Self { quiet, json }
    }

    /// Make this configuration the one returned by [`OutputConfig::current`]
    ///
    /// Only the first call has an effect.
    pub fn apply_global(self) {
        let _ = GLOBAL.set(self);
    }

    /// The globally applied configuration, or the default one
    pub fn current() -> Self {
        GLOBAL.get().copied().unwrap_or_default()
    }

    /// Whether human-readable status lines should be printed
    pub fn human(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Print a status line unless quiet or in JSON mode
    pub fn status(&self, prefix: &str, message: &str) {
        if self.human() {
            println!("{prefix} {message}");
        }
    }

    /// Print `value` as pretty JSON
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// Create a progress bar for downloads
pub fn create_download_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("█▓▒░"),
    );
    pb
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}
