//! Generate command implementation
//!
//! Implements `crossbin generate`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::{status, OutputConfig};
use crate::core::builder::Builder;

/// Execute the generate command
pub async fn execute(root: Option<&Path>, install_tools: bool) -> Result<()> {
    let (module, config) = super::load_project(root)?;
    let output = OutputConfig::current();
    let builder = Builder::new(&module, config.toolchain(), super::process_runner(&output));

    if install_tools {
        builder
            .install_tools(&config.codegen.tools)
            .context("Failed to install codegen tools")?;
    }

    builder.generate().context("Code generation failed")?;

    if output.json {
        output.print_json(&serde_json::json!({
            "tools_dir": module.codegen_tools_dir(),
            "tools_installed": install_tools.then_some(&config.codegen.tools),
        }))?;
    } else {
        output.status(
            status::SUCCESS,
            &format!("Generated code in {}", module.root_dir().display()),
        );
    }

    Ok(())
}
