//! # NewsApp
//!
//! A terminal news reader for the NewsAPI `everything` endpoint. Articles are
//! rendered as Markdown cards; category buttons, free-text search and paging
//! are typed as commands.
//!
//! ## Usage
//!
//! ```sh
//! NEWS_API_KEY=... newsapp
//! > sports
//! > search cricket
//! > next
//! ```
//!
//! ## Architecture
//!
//! 1. **Cache**: keyed page cache with optimistic mutation and stale-result
//!    discarding ([`cache`])
//! 2. **Controller**: page state, handlers and view selection ([`app`])
//! 3. **Session**: event loop running fetches as tasks ([`session`])
//! 4. **Output**: Markdown cards and page layout ([`outputs`])

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod actions;
mod api;
mod app;
mod cache;
mod cli;
mod error;
mod models;
mod outputs;
mod session;
mod utils;

use api::{Endpoint, HttpFetcher};
use app::NewsApp;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init (stderr, so logs stay out of the rendered page) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // A missing .env file is fine; the key may come from the environment or a flag.
    if let Err(e) = dotenvy::dotenv() {
        debug!(error = %e, "No .env file loaded");
    }
    let args = Cli::parse();
    debug!(topic = %args.topic, from = %args.from, page_size = args.page_size, base_url = %args.base_url, "Parsed CLI arguments");

    let endpoint = Endpoint::new(&args.base_url, args.from.clone(), args.api_key.clone())?;
    let fetcher = HttpFetcher::new()?;
    let app = NewsApp::new(endpoint, args.topic.clone(), args.page_size);

    if !args.once {
        println!("{}\n", actions::HELP);
    }
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let app = session::run(app, fetcher, input, std::io::stdout(), args.once).await?;

    let elapsed = start_time.elapsed();
    info!(?elapsed, last_page = app.page(), "Execution complete");
    Ok(())
}
