use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tokio::io::AsyncWriteExt;

use crate::app::Result;
use crate::fetcher::{Fetcher, Timeout};

/// Fixed desktop-browser identification sent with every request.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub const DEFAULT_SHORT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_LONG_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpFetcher {
    client: Client,
    short: Duration,
    long: Duration,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_SHORT_TIMEOUT, DEFAULT_LONG_TIMEOUT)
    }

    pub fn with_options(user_agent: &str, short: Duration, long: Duration) -> Self {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(user_agent)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            short,
            long,
        }
    }

    fn duration(&self, timeout: Timeout) -> Duration {
        match timeout {
            Timeout::Short => self.short,
            Timeout::Long => self.long,
        }
    }

    /// Issue the GET and fail on any non-2xx status. The User-Agent set on
    /// the client is the only header sent; no retries.
    async fn get(&self, url: &str, timeout: Timeout) -> Result<Response> {
        let response = self
            .client
            .get(url)
            .timeout(self.duration(timeout))
            .send()
            .await?;
        Ok(response.error_for_status()?)
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Timeout) -> Result<Vec<u8>> {
        let response = self.get(url, timeout).await?;
        let body = response.bytes().await?.to_vec();
        Ok(body)
    }

    async fn fetch_to_file(&self, url: &str, timeout: Timeout, path: &Path) -> Result<u64> {
        let mut response = self.get(url, timeout).await?;
        let mut file = tokio::fs::File::create(path).await?;
        let mut written = 0u64;

        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}
