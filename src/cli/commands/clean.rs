//! CLI implementation for `crossbin clean` command
//!
//! This module handles the CLI interface for cleaning build artifacts.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::core::clean::{CleanResult, CleanScope};

/// Execute the clean command
pub async fn execute(root: Option<&Path>, bin_only: bool, build_only: bool) -> Result<()> {
    let module = super::open_module(root)?;
    let output = OutputConfig::current();

    let scope = match (bin_only, build_only) {
        (true, _) => CleanScope::Binaries,
        (false, true) => CleanScope::Build,
        (false, false) => CleanScope::All,
    };

    // Check if there's anything to clean
    if !module.has_build_artifacts() {
        if output.json {
            output.print_json(&CleanResult::default())?;
        } else {
            output.status(status::SUCCESS, "Nothing to clean");
        }
        return Ok(());
    }

    let result = module
        .clean(scope)
        .with_context(|| "Failed to clean build artifacts")?;

    if output.json {
        output.print_json(&result)?;
    } else if result.removed.is_empty() {
        output.status(status::SUCCESS, "Nothing to clean");
    } else if output.human() {
        println!("{} Cleaned build artifacts:", status::SUCCESS);
        for dir in &result.removed {
            println!("  Removed {}/", dir.display());
        }
    }

    Ok(())
}
