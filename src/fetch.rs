//! Loading feed bytes from a URL or a local file, with retry and backoff.
//!
//! # Architecture
//!
//! - [`FetchFeed`]: core trait, "give me the bytes behind this location"
//! - [`HttpFetcher`]: `reqwest`-backed implementation for http(s) URLs
//! - [`RetryFetch`]: decorator adding exponential backoff to any [`FetchFeed`]
//! - [`load_feed`]: entry point that picks remote or local loading
//!
//! # Retry Strategy
//!
//! - Configurable number of retries (3 by default from the CLI)
//! - Exponential backoff starting at 500 ms
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to every delay

use rand::{Rng, rng};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

use crate::error::FeedError;
use crate::utils::is_remote;

/// Something that can retrieve the raw bytes of a feed.
#[allow(async_fn_in_trait)]
pub trait FetchFeed {
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FeedError>;
}

/// Fetches feeds over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the given per-request timeout.
    pub fn new(timeout: StdDuration) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl FetchFeed for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FeedError> {
        let t0 = Instant::now();
        let response = self.client.get(location).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        info!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed"
        );
        Ok(body.to_vec())
    }
}

/// Wrapper that retries a failing [`FetchFeed`] with exponential backoff.
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    max_retries: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchFeed,
{
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = (attempt.saturating_sub(1)).min(31) as u32;
        let delay = self
            .base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay);
        let jitter_ms: u64 = rng().random_range(0..=250);
        delay + StdDuration::from_millis(jitter_ms)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchFeed for RetryFetch<T>
where
    T: FetchFeed,
{
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, FeedError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            match self.inner.fetch(location).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_total = total_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "fetch attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Load the feed behind `source`: http(s) URLs go through `fetcher`,
/// anything else is read as a local file.
#[instrument(level = "info", skip(fetcher))]
pub async fn load_feed<F: FetchFeed>(fetcher: &F, source: &str) -> Result<Vec<u8>, FeedError> {
    if is_remote(source) {
        fetcher.fetch(source).await
    } else {
        let bytes = tokio::fs::read(source).await?;
        info!(bytes = bytes.len(), "Read feed from file");
        Ok(bytes)
    }
}
