use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::app::{PaperdropError, Result};
use crate::config::Config;
use crate::domain::{Entry, PdfCandidate};
use crate::downloader::Downloader;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{Fetcher, Timeout};
use crate::parser::{self, FeedParser};
use crate::registry::FeedRegistry;
use crate::resolver::PdfLinkResolver;

/// One running user session: the subscribed feeds, the pipeline components,
/// and the processed-link state, wired together by construction.
///
/// This is the whole surface the presentation layer sees. It owns all
/// session state (nothing here is global), and it never produces markup:
/// every operation returns plain values for the caller to render.
///
/// `entries` and `scan_for_pdfs` are fail-soft: network and parse failures
/// are logged and yield empty results. `add_feed` and `download_and_persist`
/// surface their failures as values so the caller can show them.
pub struct Session {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: FeedParser,
    resolver: PdfLinkResolver,
    downloader: Downloader,
    registry: FeedRegistry,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::with_options(
            &config.user_agent,
            config.short_timeout(),
            config.long_timeout(),
        ));
        Self::with_fetcher(fetcher, config.download_dir.clone())
    }

    /// Wire a session around an arbitrary fetcher. Tests use this to
    /// substitute a stub for the network.
    pub fn with_fetcher(
        fetcher: Arc<dyn Fetcher + Send + Sync>,
        download_dir: PathBuf,
    ) -> Self {
        Self {
            parser: FeedParser::new(),
            resolver: PdfLinkResolver::new(fetcher.clone()),
            downloader: Downloader::new(fetcher.clone(), download_dir),
            registry: FeedRegistry::new(),
            fetcher,
        }
    }

    pub fn list_feeds(&self) -> Vec<String> {
        self.registry.list().to_vec()
    }

    /// Validate then register a feed URL.
    ///
    /// Empty URLs and duplicates are rejected before any network traffic;
    /// URLs that don't parse to at least one entry are rejected after the
    /// validation probe.
    pub async fn add_feed(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(PaperdropError::Rejected("Feed URL is empty".to_string()));
        }
        if self.registry.contains(url) {
            return Err(PaperdropError::Rejected(format!(
                "Feed already added: {}",
                url
            )));
        }
        if !parser::validate_feed(self.fetcher.as_ref(), &self.parser, url).await {
            return Err(PaperdropError::Rejected(format!(
                "Not a usable feed: {}",
                url
            )));
        }

        self.registry.add(url)
    }

    /// Unsubscribe a feed; absent URLs are a no-op.
    pub fn remove_feed(&mut self, url: &str) {
        self.registry.remove(url);
    }

    /// The entries of one feed, freshly fetched, in feed order. Empty on
    /// any fetch or parse failure.
    pub async fn entries(&self, url: &str) -> Vec<Entry> {
        let body = match self.fetcher.fetch(url, Timeout::Long).await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Error fetching feed {}: {}", url, e);
                return Vec::new();
            }
        };

        match self.parser.parse(&body) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error parsing feed {}: {}", url, e);
                Vec::new()
            }
        }
    }

    /// Resolve every entry of a feed to a PDF candidate where possible.
    ///
    /// Candidates are not filtered by the processed set; callers consult
    /// [`Session::is_processed`] before re-offering one.
    pub async fn scan_for_pdfs(&self, url: &str) -> Vec<PdfCandidate> {
        let mut candidates = Vec::new();

        for entry in self.entries(url).await {
            if !entry.has_link() {
                continue;
            }
            if let Some(resolved) = self.resolver.resolve(&entry.link).await {
                candidates.push(PdfCandidate {
                    title: entry.title,
                    url: resolved,
                });
            }
        }

        candidates
    }

    /// Resolve a single link to a PDF URL, if one is discoverable.
    pub async fn resolve_pdf(&self, link: &str) -> Option<String> {
        self.resolver.resolve(link).await
    }

    /// Download a resolved PDF URL and persist it under a filename derived
    /// from `title`. Repeat URLs within the session are rejected.
    pub async fn download_and_persist(&mut self, title: &str, url: &str) -> Result<PathBuf> {
        self.downloader.download_and_persist(title, url).await
    }

    /// Advisory check for the presentation layer's re-offer suppression.
    pub fn is_processed(&self, url: &str) -> bool {
        self.downloader.is_processed(url)
    }

    pub fn download_dir(&self) -> &Path {
        self.downloader.download_dir()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::entry::NO_DATE;

    const FEED_URL: &str = "https://journal.example/feed.xml";

    const FEED_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Journal Feed</title>
    <item>
      <title>Direct Paper</title>
      <link>https://journal.example/papers/direct.pdf</link>
      <guid>direct</guid>
    </item>
    <item>
      <title>Landing Page Paper</title>
      <link>https://journal.example/articles/landing</link>
      <guid>landing</guid>
    </item>
  </channel>
</rss>"#;

    const LANDING_PAGE: &str = r#"<html><body>
      <a href="/about">About</a>
      <a href="//cdn.journal.example/x.pdf">Full text</a>
    </body></html>"#;

    const PDF_STUB: &[u8] = b"%PDF-1.4 stub";

    /// Serves canned bodies keyed by URL; unknown URLs fail.
    struct StubFetcher {
        bodies: HashMap<&'static str, &'static [u8]>,
    }

    impl StubFetcher {
        fn for_journal() -> Self {
            let mut bodies: HashMap<&'static str, &'static [u8]> = HashMap::new();
            bodies.insert(FEED_URL, FEED_SAMPLE.as_bytes());
            bodies.insert("https://journal.example/articles/landing", LANDING_PAGE.as_bytes());
            bodies.insert("https://journal.example/papers/direct.pdf", PDF_STUB);
            bodies.insert("https://cdn.journal.example/x.pdf", PDF_STUB);
            Self { bodies }
        }
    }

    #[async_trait]
    impl Fetcher for StubFetcher {
        async fn fetch(&self, url: &str, _timeout: Timeout) -> Result<Vec<u8>> {
            self.bodies
                .get(url)
                .map(|b| b.to_vec())
                .ok_or_else(|| PaperdropError::Rejected(format!("no stub body for {}", url)))
        }

        async fn fetch_to_file(&self, url: &str, timeout: Timeout, path: &Path) -> Result<u64> {
            let body = self.fetch(url, timeout).await?;
            tokio::fs::write(path, &body).await?;
            Ok(body.len() as u64)
        }
    }

    fn session_with_stub(download_dir: PathBuf) -> Session {
        Session::with_fetcher(Arc::new(StubFetcher::for_journal()), download_dir)
    }

    #[tokio::test]
    async fn test_add_feed_then_duplicate_rejected() {
        let mut session = session_with_stub(PathBuf::from("unused"));

        session.add_feed(FEED_URL).await.unwrap();
        let err = session.add_feed(FEED_URL).await.unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(session.list_feeds(), vec![FEED_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_add_feed_rejects_non_feed_body() {
        let mut session = session_with_stub(PathBuf::from("unused"));

        let err = session
            .add_feed("https://journal.example/articles/landing")
            .await
            .unwrap_err();
        assert!(err.is_rejection());
        assert!(session.list_feeds().is_empty());
    }

    #[tokio::test]
    async fn test_remove_feed_absent_is_noop() {
        let mut session = session_with_stub(PathBuf::from("unused"));
        session.add_feed(FEED_URL).await.unwrap();

        session.remove_feed("https://other.example/feed.xml");
        assert_eq!(session.list_feeds().len(), 1);
    }

    #[tokio::test]
    async fn test_entries_fill_missing_date() {
        let session = session_with_stub(PathBuf::from("unused"));

        let entries = session.entries(FEED_URL).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].published, NO_DATE);
    }

    #[tokio::test]
    async fn test_entries_empty_on_fetch_failure() {
        let session = session_with_stub(PathBuf::from("unused"));
        assert!(session.entries("https://unknown.example/feed.xml").await.is_empty());
    }

    #[tokio::test]
    async fn test_scan_resolves_direct_and_page_links() {
        let session = session_with_stub(PathBuf::from("unused"));

        let candidates = session.scan_for_pdfs(FEED_URL).await;
        assert_eq!(
            candidates,
            vec![
                PdfCandidate {
                    title: "Direct Paper".to_string(),
                    url: "https://journal.example/papers/direct.pdf".to_string(),
                },
                PdfCandidate {
                    title: "Landing Page Paper".to_string(),
                    url: "https://cdn.journal.example/x.pdf".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_download_marks_processed_but_scan_still_offers() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_stub(dir.path().to_path_buf());
        session.add_feed(FEED_URL).await.unwrap();

        let url = "https://journal.example/papers/direct.pdf";
        let path = session.download_and_persist("Direct Paper", url).await.unwrap();

        assert_eq!(path.file_name().unwrap(), "Direct_Paper.pdf");
        assert!(session.is_processed(url));

        // The scan itself keeps returning the candidate; suppression is the
        // caller's check against is_processed.
        let candidates = session.scan_for_pdfs(FEED_URL).await;
        assert!(candidates.iter().any(|c| c.url == url));

        let err = session.download_and_persist("Direct Paper", url).await.unwrap_err();
        assert!(err.is_rejection());
    }
}
