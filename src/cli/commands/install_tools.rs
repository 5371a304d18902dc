//! Install-tools command implementation
//!
//! Implements `crossbin install-tools`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::core::builder::Builder;

/// Execute the install-tools command
pub async fn execute(root: Option<&Path>, tools: Vec<String>) -> Result<()> {
    let (module, config) = super::load_project(root)?;
    let output = OutputConfig::current();

    let tools = if tools.is_empty() {
        config.codegen.tools.clone()
    } else {
        tools
    };

    if tools.is_empty() {
        output.status(status::WARNING, "No codegen tools configured");
        return Ok(());
    }

    let builder = Builder::new(&module, config.toolchain(), super::process_runner(&output));
    builder
        .install_tools(&tools)
        .context("Failed to install codegen tools")?;

    let tools_dir = module.codegen_tools_dir();
    if output.json {
        output.print_json(&serde_json::json!({
            "tools_dir": tools_dir,
            "tools": tools,
        }))?;
    } else {
        for tool in &tools {
            output.status(status::SUCCESS, &format!("Installed {tool}"));
        }
        output.status(status::INFO, &format!("Tools are in {}", tools_dir.display()));
    }

    Ok(())
}
