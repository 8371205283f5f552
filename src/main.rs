use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use paperdrop::cli::{commands, Cli, Commands};
use paperdrop::config::Config;
use paperdrop::session::Session;

const LOG_FILE: &str = "paperdrop.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let mut session = Session::new(&config);

    match cli.command {
        Commands::Add { url } => {
            commands::add_feed(&mut session, &url).await;
        }
        Commands::Remove { url } => {
            commands::remove_feed(&mut session, &url);
        }
        Commands::List => {
            commands::list_feeds(&session);
        }
        Commands::Entries { url } => {
            commands::show_entries(&session, &url).await;
        }
        Commands::Scan { url } => {
            commands::scan_feed(&session, &url).await;
        }
        Commands::Download { url, title } => {
            commands::download(&mut session, &url, &title).await;
        }
        Commands::Shell => {
            commands::shell(&mut session).await;
        }
    }

    Ok(())
}
