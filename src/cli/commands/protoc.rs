//! Protoc command implementation
//!
//! Implements `crossbin protoc`: resolves the release archive URL for a
//! context and optionally downloads it into the module's download cache.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::cli::output::OutputConfig;
use crate::core::platform::BuildContext;
use crate::core::protoc;
use crate::error::{ConfigError, CrossbinError};
use crate::infra::download::{DownloadManager, DownloadedFile};

/// Execute the protoc command
pub async fn execute(
    root: Option<&Path>,
    release: Option<String>,
    target: Option<BuildContext>,
    download: bool,
) -> Result<()> {
    let (module, config) = super::load_project(root)?;
    let output = OutputConfig::current();

    let release = release
        .or(config.codegen.protoc)
        .ok_or_else(|| ConfigError::Invalid {
            message: "no protoc release: pass --release or set protoc in the [codegen] section"
                .to_string(),
        })
        .map_err(CrossbinError::from)?;
    let context = target.unwrap_or_else(BuildContext::host);
    let url = protoc::release_for_context(&release, &context)
        .ok_or_else(|| anyhow!("protoc {release} has no release archive for {context}"))?;

    if !download {
        if output.json {
            output.print_json(&serde_json::json!({
                "release": release,
                "context": context,
                "url": url,
            }))?;
        } else if !output.quiet {
            println!("{url}");
        }
        return Ok(());
    }

    let file = DownloadedFile::new(url)
        .for_module(&module)
        .for_context(context);
    let report = super::download::fetch(&DownloadManager::new(), &file, &output, false).await?;
    if output.json {
        output.print_json(&report)?;
    }

    Ok(())
}
