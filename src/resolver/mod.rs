use std::sync::Arc;

use scraper::{Html, Selector};
use url::Url;

use crate::app::Result;
use crate::fetcher::{Fetcher, Timeout};

/// Resolves a feed entry's link to an absolute PDF URL.
///
/// Direct `.pdf` links pass through untouched; anything else costs one page
/// fetch and an anchor scan. `None` always means "no PDF discoverable", so
/// callers can skip the entry without branching on failure causes.
pub struct PdfLinkResolver {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl PdfLinkResolver {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        Self { fetcher }
    }

    pub async fn resolve(&self, entry_link: &str) -> Option<String> {
        if is_pdf_url(entry_link) {
            return Some(entry_link.to_string());
        }

        let body = match self.fetcher.fetch(entry_link, Timeout::Long).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Error fetching page {}: {}", entry_link, e);
                return None;
            }
        };

        let html = String::from_utf8_lossy(&body);
        let href = find_pdf_href(&html)?;

        match absolutize(entry_link, &href) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                tracing::warn!("Unusable PDF href {:?} on {}: {}", href, entry_link, e);
                None
            }
        }
    }
}

/// Case-insensitive `.pdf` suffix check.
pub fn is_pdf_url(url: &str) -> bool {
    url.to_lowercase().ends_with(".pdf")
}

/// First `.pdf`-suffixed anchor href in document order, if any.
pub fn find_pdf_href(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a[href]").expect("valid anchor selector");

    document
        .select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| is_pdf_url(href))
        .map(str::to_string)
}

/// Normalize a discovered href to an absolute URL.
///
/// `http...` hrefs pass through and protocol-relative `//...` hrefs get an
/// `https:` scheme, exactly as discovered. Everything else is joined against
/// the page URL with standards-compliant resolution (not string
/// concatenation), so query strings and missing trailing slashes in the base
/// cannot produce malformed URLs.
pub fn absolutize(page_url: &str, href: &str) -> Result<String> {
    if href.starts_with("http") {
        return Ok(href.to_string());
    }
    if let Some(rest) = href.strip_prefix("//") {
        return Ok(format!("https://{}", rest));
    }

    let base = Url::parse(page_url)?;
    Ok(base.join(href)?.to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use async_trait::async_trait;

    use super::*;
    use crate::app::PaperdropError;

    const PAGE_WITH_PDF: &str = r#"<html><body>
      <a href="/about">About</a>
      <a href="papers/first.PDF">First paper</a>
      <a href="papers/second.pdf">Second paper</a>
    </body></html>"#;

    const PAGE_WITHOUT_PDF: &str = r#"<html><body>
      <a href="/about">About</a>
      <a href="/contact">Contact</a>
    </body></html>"#;

    struct StubPageFetcher {
        body: std::result::Result<&'static str, ()>,
    }

    #[async_trait]
    impl Fetcher for StubPageFetcher {
        async fn fetch(&self, url: &str, _timeout: Timeout) -> crate::app::Result<Vec<u8>> {
            match self.body {
                Ok(body) => Ok(body.as_bytes().to_vec()),
                Err(()) => Err(PaperdropError::Rejected(format!("unreachable: {}", url))),
            }
        }

        async fn fetch_to_file(
            &self,
            _url: &str,
            _timeout: Timeout,
            _path: &Path,
        ) -> crate::app::Result<u64> {
            unimplemented!("not used by resolver tests")
        }
    }

    /// Panics on any fetch, proving direct links never touch the network.
    struct PanickingFetcher;

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch(&self, url: &str, _timeout: Timeout) -> crate::app::Result<Vec<u8>> {
            panic!("unexpected fetch of {}", url);
        }

        async fn fetch_to_file(
            &self,
            url: &str,
            _timeout: Timeout,
            _path: &Path,
        ) -> crate::app::Result<u64> {
            panic!("unexpected fetch of {}", url);
        }
    }

    #[test]
    fn test_is_pdf_url_case_insensitive() {
        assert!(is_pdf_url("https://example.com/report.pdf"));
        assert!(is_pdf_url("https://example.com/report.PDF"));
        assert!(is_pdf_url("https://example.com/report.Pdf"));
        assert!(!is_pdf_url("https://example.com/report.pdf.html"));
        assert!(!is_pdf_url("https://example.com/report"));
    }

    #[test]
    fn test_find_pdf_href_takes_first_in_document_order() {
        assert_eq!(
            find_pdf_href(PAGE_WITH_PDF),
            Some("papers/first.PDF".to_string())
        );
    }

    #[test]
    fn test_find_pdf_href_none_when_absent() {
        assert_eq!(find_pdf_href(PAGE_WITHOUT_PDF), None);
    }

    #[test]
    fn test_absolutize_http_passes_through() {
        let resolved = absolutize(
            "https://example.com/post",
            "http://cdn.example.com/x.pdf",
        )
        .unwrap();
        assert_eq!(resolved, "http://cdn.example.com/x.pdf");
    }

    #[test]
    fn test_absolutize_protocol_relative_gets_https() {
        let resolved = absolutize("https://example.com/post", "//cdn.example.com/x.pdf").unwrap();
        assert_eq!(resolved, "https://cdn.example.com/x.pdf");
    }

    #[test]
    fn test_absolutize_relative_path_joins_against_page() {
        let resolved = absolutize("https://example.com/articles/post1", "files/x.pdf").unwrap();
        assert_eq!(resolved, "https://example.com/articles/files/x.pdf");
    }

    #[test]
    fn test_absolutize_ignores_query_string_in_base() {
        let resolved = absolutize("https://example.com/post?page=2", "x.pdf").unwrap();
        assert_eq!(resolved, "https://example.com/x.pdf");
    }

    #[test]
    fn test_absolutize_rooted_path() {
        let resolved = absolutize("https://example.com/articles/post1", "/files/x.pdf").unwrap();
        assert_eq!(resolved, "https://example.com/files/x.pdf");
    }

    #[tokio::test]
    async fn test_resolve_direct_pdf_link_unchanged_without_fetch() {
        let resolver = PdfLinkResolver::new(Arc::new(PanickingFetcher));
        let resolved = resolver.resolve("https://example.com/Report.PDF").await;
        assert_eq!(resolved, Some("https://example.com/Report.PDF".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_scans_page_and_absolutizes() {
        let resolver = PdfLinkResolver::new(Arc::new(StubPageFetcher {
            body: Ok(PAGE_WITH_PDF),
        }));
        let resolved = resolver.resolve("https://example.com/articles/post1").await;
        assert_eq!(
            resolved,
            Some("https://example.com/articles/papers/first.PDF".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_none_when_page_has_no_pdf() {
        let resolver = PdfLinkResolver::new(Arc::new(StubPageFetcher {
            body: Ok(PAGE_WITHOUT_PDF),
        }));
        assert_eq!(resolver.resolve("https://example.com/post").await, None);
    }

    #[tokio::test]
    async fn test_resolve_none_on_fetch_failure() {
        let resolver = PdfLinkResolver::new(Arc::new(StubPageFetcher { body: Err(()) }));
        assert_eq!(resolver.resolve("https://example.com/post").await, None);
    }
}
