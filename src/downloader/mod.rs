use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::{PaperdropError, Result};
use crate::fetcher::{Fetcher, Timeout};

/// Streams resolved PDF URLs to disk, at most once per URL per session.
///
/// The processed-link set lives here rather than in the presentation layer:
/// a repeat URL is rejected before any network traffic, and a URL is
/// recorded only after its file is fully written. The set is also readable
/// so the UI can suppress re-offering a candidate.
pub struct Downloader {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    download_dir: PathBuf,
    processed: HashSet<String>,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, download_dir: PathBuf) -> Self {
        Self {
            fetcher,
            download_dir,
            processed: HashSet::new(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Whether `url` was already delivered this session.
    pub fn is_processed(&self, url: &str) -> bool {
        self.processed.contains(url)
    }

    /// Stream `url` into `<download_dir>/<sanitized title>.pdf`.
    ///
    /// Write failures are surfaced to the caller, never swallowed.
    pub async fn download_and_persist(&mut self, title: &str, url: &str) -> Result<PathBuf> {
        if self.processed.contains(url) {
            return Err(PaperdropError::Rejected(format!(
                "Already downloaded this session: {}",
                url
            )));
        }

        tokio::fs::create_dir_all(&self.download_dir).await?;

        let path = self.download_dir.join(sanitize_title(title));
        let written = self.fetcher.fetch_to_file(url, Timeout::Long, &path).await?;

        self.processed.insert(url.to_string());
        tracing::info!("Downloaded {} ({} bytes) to {}", url, written, path.display());

        Ok(path)
    }
}

/// Reduce a title to a safe filename: only alphanumerics, spaces, `-` and
/// `_` survive, trailing whitespace is trimmed, spaces become underscores,
/// and `.pdf` is appended.
pub fn sanitize_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();

    format!("{}.pdf", kept.trim_end().replace(' ', "_"))
}
