pub mod http_fetcher;

use std::path::Path;

use async_trait::async_trait;

use crate::app::Result;

/// Timeout tier for a single request.
///
/// Validation probes use the short tier; page, feed content, and PDF
/// retrieval use the long one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    Short,
    Long,
}

#[async_trait]
pub trait Fetcher {
    /// Fetch the full body at `url`.
    async fn fetch(&self, url: &str, timeout: Timeout) -> Result<Vec<u8>>;

    /// Stream the body at `url` directly into the file at `path`,
    /// returning the number of bytes written. Keeps memory bounded for
    /// large downloads.
    async fn fetch_to_file(&self, url: &str, timeout: Timeout, path: &Path) -> Result<u64>;
}
