//! Dirs command implementation
//!
//! Implements `crossbin dirs`, printing the directories derived from the
//! module root.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::OutputConfig;
use crate::core::platform::BuildContext;

#[derive(Serialize)]
struct ModuleDirs {
    root: PathBuf,
    binaries: PathBuf,
    build: PathBuf,
    staging: PathBuf,
    codegen_tools: PathBuf,
    downloads: PathBuf,
}

/// Execute the dirs command
pub async fn execute(root: Option<&Path>) -> Result<()> {
    let module = super::open_module(root)?;
    let output = OutputConfig::current();

    let dirs = ModuleDirs {
        root: module.root_dir().to_path_buf(),
        binaries: module.binaries_dir(),
        build: module.build_dir(),
        staging: module.staging_dir(&BuildContext::host()),
        codegen_tools: module.codegen_tools_dir(),
        downloads: module.downloads_dir(),
    };

    if output.json {
        output.print_json(&dirs)?;
    } else if !output.quiet {
        println!("root:          {}", dirs.root.display());
        println!("binaries:      {}", dirs.binaries.display());
        println!("build:         {}", dirs.build.display());
        println!("staging:       {}", dirs.staging.display());
        println!("codegen tools: {}", dirs.codegen_tools.display());
        println!("downloads:     {}", dirs.downloads.display());
    }

    Ok(())
}
