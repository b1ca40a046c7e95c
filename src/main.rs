//! Command-line entry point.
//!
//! ## Usage
//!
//! ```sh
//! rss_to_html https://news.example.com/rss -o news
//! ```
//!
//! Writes `news.html`. If the document is not an RSS 2.0 feed, prints
//! `invalid url` and writes nothing.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use rss_to_html::cli::Cli;
use rss_to_html::fetch::{HttpFetcher, RetryFetch, load_feed};
use rss_to_html::utils::{html_file_name, prompt};
use rss_to_html::{INVALID_FEED_MESSAGE, Outcome, convert_to_file};

/// First delay between download retries; doubles on each attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // stdout is reserved for prompts and the invalid-feed message
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let source = match args.source {
        Some(source) => source,
        None => prompt("Enter an RSS 2.0 URL: ").await?,
    };
    let output = match args.output {
        Some(output) => output,
        None => prompt("Enter output file name: ").await?,
    };
    info!(%source, %output, "Converting feed");

    // ---- Load ----
    let fetcher = RetryFetch::new(
        HttpFetcher::new(Duration::from_secs(args.timeout_secs))?,
        args.retries,
        RETRY_BASE_DELAY,
    );
    let bytes = load_feed(&fetcher, &source).await?;

    // ---- Parse, render, write ----
    let path = html_file_name(&output);
    match convert_to_file(&bytes, &path).await? {
        Outcome::Invalid => println!("{INVALID_FEED_MESSAGE}"),
        Outcome::Written(rows) => {
            let elapsed = start_time.elapsed();
            info!(
                path = %path.display(),
                rows,
                ?elapsed,
                millis = elapsed.as_millis() as u64,
                "Conversion finished"
            );
        }
    }

    Ok(())
}
