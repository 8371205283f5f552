use std::io::{self, BufRead, Write};

use crate::domain::PdfCandidate;
use crate::session::Session;

/// Render a rejection as a warning and anything else as an error. No
/// command failure is fatal to the process.
fn report(err: &crate::app::PaperdropError) {
    if err.is_rejection() {
        eprintln!("Warning: {}", err);
    } else {
        eprintln!("Error: {}", err);
    }
}

pub async fn add_feed(session: &mut Session, url: &str) {
    match session.add_feed(url).await {
        Ok(()) => println!("Added feed: {}", url),
        Err(e) => report(&e),
    }
}

pub fn remove_feed(session: &mut Session, url: &str) {
    session.remove_feed(url);
    println!("Removed feed: {}", url);
}

pub fn list_feeds(session: &Session) {
    let feeds = session.list_feeds();
    if feeds.is_empty() {
        println!("No feeds");
        return;
    }

    for feed in feeds {
        println!("{}", feed);
    }
}

pub async fn show_entries(session: &Session, url: &str) {
    let entries = session.entries(url).await;
    if entries.is_empty() {
        println!("No entries");
        return;
    }

    for entry in entries {
        println!("{}", entry.title);
        println!("  Published: {}", entry.published);
        println!("  Link: {}", entry.link);
        println!("  {}", entry.summary);
    }
}

pub async fn scan_feed(session: &Session, url: &str) {
    let candidates = session.scan_for_pdfs(url).await;
    print_candidates(session, &candidates);
}

fn print_candidates(session: &Session, candidates: &[PdfCandidate]) {
    if candidates.is_empty() {
        println!("No PDFs found");
        return;
    }

    println!("Found {} PDFs:", candidates.len());
    for (i, candidate) in candidates.iter().enumerate() {
        let marker = if session.is_processed(&candidate.url) {
            " [downloaded]"
        } else {
            ""
        };
        println!("  {}. {}{}\n     {}", i + 1, candidate.title, marker, candidate.url);
    }
}

pub async fn download(session: &mut Session, url: &str, title: &str) {
    let Some(resolved) = session.resolve_pdf(url).await else {
        println!("No PDF found at {}", url);
        return;
    };

    match session.download_and_persist(title, &resolved).await {
        Ok(path) => println!("Saved {}", path.display()),
        Err(e) => report(&e),
    }
}

/// Line-oriented dashboard over one session. Feed subscriptions and the
/// processed-link set live exactly as long as this loop.
pub async fn shell(session: &mut Session) {
    println!("paperdrop shell. Downloads go to {}.", session.download_dir().display());
    println!("Commands:");
    println!("  add <url> | remove <url> | list | entries <url> | scan <url>");
    println!("  get <n>   - download candidate n from the last scan");
    println!("  quit");

    let stdin = io::stdin();
    let mut last_scan: Vec<PdfCandidate> = Vec::new();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let arg = parts.next();

        match (command, arg) {
            ("add", Some(url)) => add_feed(session, url).await,
            ("remove", Some(url)) => remove_feed(session, url),
            ("list", _) => list_feeds(session),
            ("entries", Some(url)) => show_entries(session, url).await,
            ("scan", Some(url)) => {
                last_scan = session.scan_for_pdfs(url).await;
                print_candidates(session, &last_scan);
            }
            ("get", Some(index)) => {
                let candidate = index
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|n| last_scan.get(n).cloned());
                match candidate {
                    Some(c) => {
                        if session.is_processed(&c.url) {
                            println!("Already downloaded this session: {}", c.url);
                        } else {
                            match session.download_and_persist(&c.title, &c.url).await {
                                Ok(path) => println!("Saved {}", path.display()),
                                Err(e) => report(&e),
                            }
                        }
                    }
                    None => println!("No such candidate; run scan first"),
                }
            }
            ("quit", _) | ("exit", _) => break,
            ("", _) => {}
            _ => println!("Unknown command"),
        }
    }
}
