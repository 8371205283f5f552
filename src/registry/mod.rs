use crate::app::{PaperdropError, Result};

/// Insertion-ordered, duplicate-free collection of subscribed feed URLs.
///
/// Session-scoped: lives in process memory and is never persisted.
#[derive(Debug, Default)]
pub struct FeedRegistry {
    feeds: Vec<String>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.feeds.iter().any(|f| f == url)
    }

    /// Append a URL. Empty URLs and duplicates are rejections, not panics.
    pub fn add(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(PaperdropError::Rejected("Feed URL is empty".to_string()));
        }
        if self.contains(url) {
            return Err(PaperdropError::Rejected(format!(
                "Feed already added: {}",
                url
            )));
        }

        self.feeds.push(url.to_string());
        Ok(())
    }

    /// Remove a URL; removing an absent URL is a no-op.
    pub fn remove(&mut self, url: &str) {
        self.feeds.retain(|f| f != url);
    }

    pub fn list(&self) -> &[String] {
        &self.feeds
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }
}
