//! Command-line interface definitions.
//!
//! Every argument can also come from an environment variable. When the feed
//! source or the output name is missing altogether, `main` prompts for it on
//! the terminal instead.

use clap::Parser;

/// Convert an RSS 2.0 feed into an HTML page with one table row per item.
///
/// # Examples
///
/// ```sh
/// # Fetch a remote feed and write news.html
/// rss_to_html https://news.example.com/rss -o news
///
/// # Convert a local file, allowing more retries for slow mirrors
/// rss_to_html ./feed.xml --output out/feed --retries 5
///
/// # No arguments: prompt for both
/// rss_to_html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Feed location: an http(s) URL or a local file path
    #[arg(env = "RSS_FEED_URL")]
    pub source: Option<String>,

    /// Output file name; ".html" is appended unless already present
    #[arg(short, long, env = "RSS_OUTPUT")]
    pub output: Option<String>,

    /// How many times a failed download is retried
    #[arg(long, default_value_t = 3)]
    pub retries: usize,

    /// Per-request timeout for remote feeds, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}
