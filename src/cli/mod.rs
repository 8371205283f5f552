pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "paperdrop")]
#[command(about = "Fetch RSS/Atom feeds and download the PDFs they link to", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Subscribe to a feed (validated before it is added)
    Add {
        /// URL of the feed to add
        url: String,
    },
    /// Unsubscribe from a feed
    Remove {
        /// URL of the feed to remove
        url: String,
    },
    /// List subscribed feeds
    List,
    /// Show the entries of one feed
    Entries {
        /// Feed URL to fetch
        url: String,
    },
    /// Scan a feed's entries for downloadable PDFs
    Scan {
        /// Feed URL to scan
        url: String,
    },
    /// Resolve a link and download the PDF behind it
    Download {
        /// Entry link or direct PDF URL
        url: String,
        /// Title used for the saved filename
        #[arg(short, long, default_value = "document")]
        title: String,
    },
    /// Interactive dashboard: add feeds, scan, and pick downloads in one session
    Shell,
}
