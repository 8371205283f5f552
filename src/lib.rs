//! # paperdrop
//!
//! Register RSS/Atom feeds, browse their entries, and download the PDFs
//! they link to.
//!
//! ## Architecture
//!
//! The core is a feed-to-PDF resolution pipeline:
//!
//! ```text
//! Registry → Validator → Parser → Resolver → Downloader
//! ```
//!
//! An entry link either is a PDF already or points at a page whose anchors
//! are scanned for the first `.pdf` href. Resolved files are streamed to a
//! download directory at most once per URL per session.
//!
//! All state is session-scoped and in-memory: nothing survives a restart,
//! and nothing is global. The [`Session`](session::Session) facade is the
//! only surface a presentation layer needs; the bundled CLI is one such
//! caller.

/// Error type shared across the pipeline.
pub mod app;

/// Command-line interface using clap; the bundled presentation layer.
pub mod cli;

/// Configuration loaded from `~/.config/paperdrop/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): one feed item, with placeholder defaults
/// - [`PdfCandidate`](domain::PdfCandidate): a scan result (title, URL)
pub mod domain;

/// PDF retrieval and persistence, with per-session at-most-once delivery.
pub mod downloader;

/// HTTP fetching behind a trait so tests can stub the network.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait with short/long timeout tiers
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed parsing via feed-rs, plus the usable-feed validation gate.
pub mod parser;

/// In-memory, insertion-ordered registry of subscribed feed URLs.
pub mod registry;

/// Entry-link-to-PDF resolution: direct links, page scans, href
/// normalization.
pub mod resolver;

/// The presentation boundary: one [`Session`](session::Session) per running
/// UI, owning registry and processed-link state.
pub mod session;
