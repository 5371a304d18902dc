//! HTTP download functionality
//!
//! Fetches a single URL to a deterministic local path, streaming the body to
//! disk chunk by chunk. Files that belong to a module are cached under its
//! downloads directory; others resolve against the current directory.

use futures::StreamExt;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::core::module::Module;
use crate::core::platform::BuildContext;
use crate::error::DownloadError;

/// Progress callback type for download progress reporting
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// A file fetched from a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile<'m> {
    /// The URL the file is downloaded from
    pub url: String,
    /// Local file name; derived from the URL's last path segment when `None`
    pub filename: Option<String>,
    /// Module whose download cache holds the file
    pub module: Option<&'m Module>,
    /// Target context of the file; the host when `None`
    pub context: Option<BuildContext>,
}

impl<'m> DownloadedFile<'m> {
    /// A file named after the URL's last path segment
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: None,
            module: None,
            context: None,
        }
    }

    /// Store the file under an explicit name
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Cache the file in a module's downloads directory
    #[must_use]
    pub fn for_module(mut self, module: &'m Module) -> Self {
        self.module = Some(module);
        self
    }

    /// Cache the file under a target context's downloads directory
    #[must_use]
    pub fn for_context(mut self, context: BuildContext) -> Self {
        self.context = Some(context);
        self
    }

    /// The name the file is stored under
    pub fn filename(&self) -> String {
        self.filename
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| url_file_name(&self.url))
    }

    /// Absolute path of the local copy
    pub fn local_path(&self) -> PathBuf {
        let filename = PathBuf::from(self.filename());

        if let Some(module) = self.module {
            let base = filename.file_name().map_or_else(|| filename.clone(), PathBuf::from);
            let dir = self
                .context
                .as_ref()
                .map_or_else(|| module.downloads_dir(), |ctx| module.downloads_dir_for(ctx));
            return dir.join(base);
        }

        std::env::current_dir().map_or(filename.clone(), |cwd| cwd.join(&filename))
    }

    /// Whether the local copy is present (contents are not checked)
    pub fn exists(&self) -> bool {
        self.local_path().exists()
    }
}

/// Last path segment of a URL, ignoring any query string or fragment
pub fn url_file_name(url: &str) -> String {
    if let Ok(parsed) = reqwest::Url::parse(url) {
        if let Some(segment) = parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
        {
            return segment.to_string();
        }
    }
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .to_string()
}

/// Download result containing file path and metadata
#[derive(Debug, Clone, Serialize)]
pub struct DownloadResult {
    /// Path to the downloaded file
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
    /// SHA256 checksum of the downloaded content
    pub checksum: String,
}

/// Download manager holding a reusable HTTP client
#[derive(Debug, Clone)]
pub struct DownloadManager {
    /// HTTP client
    client: reqwest::Client,
}

impl DownloadManager {
    /// Create a new download manager
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Download a file to its local path
    ///
    /// # Arguments
    /// * `file` - What to download and where it belongs
    /// * `progress` - Optional progress callback (`bytes_downloaded`, `total_bytes`)
    ///
    /// # Returns
    /// Download result with path, size, and checksum. A failure after the
    /// local file was opened removes the partial file; a failed request leaves
    /// any earlier copy untouched.
    pub async fn download(
        &self,
        file: &DownloadedFile<'_>,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult, DownloadError> {
        let dest = file.local_path();
        tracing::info!("Downloading {} to {}", file.url, dest.display());

        let response = self.fetch(&file.url).await?;

        let result = write_body(response, &file.url, &dest, progress.as_ref()).await;
        if result.is_err() {
            let _ = tokio::fs::remove_file(&dest).await;
        }
        result
    }

    /// Send the GET request and reject non-success statuses
    async fn fetch(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DownloadError::NetworkError {
                url: url.to_string(),
                error: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::HttpStatus {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response)
    }
}

/// Stream a response body into `dest`
async fn write_body(
    response: reqwest::Response,
    url: &str,
    dest: &Path,
    progress: Option<&ProgressCallback>,
) -> Result<DownloadResult, DownloadError> {
    let total_size = response.content_length().unwrap_or(0);

    // Create parent directories if needed
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DownloadError::IoError {
                path: parent.to_path_buf(),
                error: e.to_string(),
            })?;
    }

    let mut output = File::create(dest)
        .await
        .map_err(|e| DownloadError::IoError {
            path: dest.to_path_buf(),
            error: e.to_string(),
        })?;

    let mut hasher = Sha256::new();
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::NetworkError {
            url: url.to_string(),
            error: e.to_string(),
        })?;

        output
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::IoError {
                path: dest.to_path_buf(),
                error: e.to_string(),
            })?;

        hasher.update(&chunk);
        downloaded += chunk.len() as u64;

        if let Some(cb) = progress {
            cb(downloaded, total_size);
        }
    }

    output.flush().await.map_err(|e| DownloadError::IoError {
        path: dest.to_path_buf(),
        error: e.to_string(),
    })?;

    Ok(DownloadResult {
        path: dest.to_path_buf(),
        size: downloaded,
        checksum: hex::encode(hasher.finalize()),
    })
}

impl Default for DownloadManager {
    fn default() -> Self {
        Self::new()
    }
}
