use feed_rs::parser;
use html_escape::decode_html_entities;

use crate::app::{PaperdropError, Result};
use crate::domain::entry::{NO_DATE, NO_SUMMARY, NO_TITLE};
use crate::domain::Entry;
use crate::fetcher::{Fetcher, Timeout};

#[derive(Clone)]
pub struct FeedParser;

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw feed bytes into entries, preserving feed order.
    ///
    /// Handles RSS and Atom alike via feed-rs. Missing fields get the
    /// documented placeholder defaults instead of being dropped.
    pub fn parse(&self, body: &[u8]) -> Result<Vec<Entry>> {
        let feed = parser::parse(body).map_err(|e| PaperdropError::Parse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .map(|entry| Entry {
                title: entry
                    .title
                    .map(|t| decode_html_entities(&t.content).to_string())
                    .unwrap_or_else(|| NO_TITLE.to_string()),
                link: entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default(),
                published: entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.to_rfc2822())
                    .unwrap_or_else(|| NO_DATE.to_string()),
                summary: entry
                    .summary
                    .map(|s| decode_html_entities(&s.content).to_string())
                    .unwrap_or_else(|| NO_SUMMARY.to_string()),
            })
            .collect();

        Ok(entries)
    }
}

/// Gate used before admitting a URL into the registry: a URL is a usable
/// feed iff it fetches within the short timeout and parses to at least one
/// entry. Any failure means false.
pub async fn validate_feed(fetcher: &dyn Fetcher, parser: &FeedParser, url: &str) -> bool {
    let body = match fetcher.fetch(url, Timeout::Short).await {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!("Error validating feed {}: {}", url, e);
            return false;
        }
    };

    match parser.parse(&body) {
        Ok(entries) => !entries.is_empty(),
        Err(e) => {
            tracing::warn!("Error validating feed {}: {}", url, e);
            false
        }
    }
}
