//! Download command implementation
//!
//! Implements `crossbin download` for a single URL or every `[[download]]`
//! entry of the project configuration.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use crate::cli::output::{create_download_bar, status, OutputConfig};
use crate::config::project::DownloadConfig;
use crate::infra::download::{DownloadManager, DownloadedFile, ProgressCallback};

/// Download arguments collected from the command line
#[derive(Debug, Default)]
pub struct DownloadArgs {
    /// Single URL to download
    pub url: Option<String>,
    /// Local file name for `url`
    pub filename: Option<String>,
    /// Resolve against the current directory instead of the module cache
    pub global: bool,
    /// Download even if already present
    pub force: bool,
}

/// Outcome of one download
#[derive(Debug, Serialize)]
pub(crate) struct DownloadReport {
    url: String,
    path: PathBuf,
    skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
}

/// Execute the download command
pub async fn execute(root: Option<&Path>, args: DownloadArgs) -> Result<()> {
    let (module, config) = super::load_project(root)?;
    let output = OutputConfig::current();

    let entries = match args.url {
        Some(url) => vec![DownloadConfig {
            url,
            filename: args.filename,
        }],
        None => config.downloads,
    };
    if entries.is_empty() {
        bail!("Nothing to download: pass a URL or add [[download]] entries to crossbin.toml");
    }

    let manager = DownloadManager::new();
    let mut reports = Vec::with_capacity(entries.len());
    for entry in &entries {
        let mut file = DownloadedFile::new(&entry.url);
        if let Some(filename) = &entry.filename {
            file = file.with_filename(filename);
        }
        if !args.global {
            file = file.for_module(&module);
        }
        reports.push(fetch(&manager, &file, &output, args.force).await?);
    }

    if output.json {
        output.print_json(&reports)?;
    }

    Ok(())
}

/// Download `file` unless it is already present, reporting progress
pub(crate) async fn fetch(
    manager: &DownloadManager,
    file: &DownloadedFile<'_>,
    output: &OutputConfig,
    force: bool,
) -> Result<DownloadReport> {
    let path = file.local_path();

    if !force && file.exists() {
        tracing::debug!("{} already present, skipping", path.display());
        output.status(status::INFO, &format!("Already downloaded {}", path.display()));
        return Ok(DownloadReport {
            url: file.url.clone(),
            path,
            skipped: true,
            size: None,
            checksum: None,
        });
    }

    let bar = output.human().then(|| create_download_bar(0));
    let progress: Option<ProgressCallback> = bar.clone().map(|bar| {
        Box::new(move |downloaded: u64, total: u64| {
            if total > 0 {
                bar.set_length(total);
            }
            bar.set_position(downloaded);
        }) as ProgressCallback
    });

    let result = manager.download(file, progress).await;
    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    let result = result.with_context(|| format!("Failed to download {}", file.url))?;

    output.status(
        status::SUCCESS,
        &format!("Downloaded {} ({} bytes)", result.path.display(), result.size),
    );
    Ok(DownloadReport {
        url: file.url.clone(),
        path: result.path,
        skipped: false,
        size: Some(result.size),
        checksum: Some(result.checksum),
    })
}
