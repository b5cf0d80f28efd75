//! Command-line interface definitions.
//!
//! Only the API key may come from the environment (`NEWS_API_KEY`, or a
//! `.env` file); everything else is a flag with a default.

use crate::api::DEFAULT_BASE_URL;
use crate::app::{DEFAULT_TOPIC, PAGE_SIZE};
use chrono::NaiveDate;
use clap::Parser;

/// Date the search window starts from when `--from` is not given.
pub const DEFAULT_FROM: &str = "2025-01-25";

/// Read NewsAPI headlines in the terminal.
///
/// # Examples
///
/// ```sh
/// # Interactive session
/// NEWS_API_KEY=... newsapp
///
/// # Print the first page and exit
/// newsapp --api-key ... --topic karachi --once
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// NewsAPI key
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Topic the page is keyed on
    #[arg(long, default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Oldest publish date to search from (YYYY-MM-DD)
    #[arg(long, default_value = DEFAULT_FROM, value_parser = parse_date)]
    pub from: String,

    /// Articles per page
    #[arg(long, default_value_t = PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..=100))]
    pub page_size: u32,

    /// Search endpoint
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Render the first page and exit instead of reading commands
    #[arg(long)]
    pub once: bool,
}

fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
