//! HTTP page fetching for the conference scraper.
//!
//! This crate is deliberately thin: a [`Fetcher`] wraps a [`reqwest::Client`]
//! with a per-request timeout and a small bounded retry loop. Everything the
//! pipeline knows about a page is the raw HTML string this crate hands back;
//! parsing lives in `podium-extract`.
//!
//! A page that still fails after the configured retries is the caller's
//! problem to log and skip. Nothing here is fatal to a batch.

pub mod error;

use std::time::Duration;

use exn::ResultExt;
use tracing::{debug, instrument, warn};

use crate::error::{ErrorKind, Result};

/// Retry/timeout knobs for a [`Fetcher`].
///
/// The binary populates this from `podium-config`; tests construct it
/// directly.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Number of *re*tries after the initial attempt.
    pub retries: u32,
    /// Base backoff; attempt `n` sleeps `backoff * n` before retrying.
    pub backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retries: 3,
            backoff: Duration::from_millis(500),
        }
    }
}

/// A reusable HTTP client for fetching conference pages.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(options: FetchOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("podium/", env!("CARGO_PKG_VERSION")))
            .build()
            .or_raise(|| ErrorKind::Client)?;
        Ok(Self { client, options })
    }

    /// Fetch a page and return its body as a string.
    ///
    /// Transient failures (connect errors, timeouts, 5xx, 429) are retried
    /// with linear backoff up to the configured retry count. Non-retryable
    /// failures and exhausted retries are returned to the caller.
    #[instrument(skip(self))]
    pub async fn fetch_html(&self, url: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.try_fetch(url).await {
                Ok(body) => {
                    debug!(attempt, "fetched {url}");
                    return Ok(body);
                }
                Err(err) if attempt <= self.options.retries && err.is_retryable() => {
                    warn!(attempt, "retrying {url}: {err}");
                    tokio::time::sleep(self.options.backoff * attempt).await;
                }
                Err(err) if attempt > 1 => {
                    return Err(err).or_raise(|| ErrorKind::RetriesExhausted(url.to_string()));
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .or_raise(|| ErrorKind::Request(url.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        response.text().await.or_raise(|| ErrorKind::Request(url.to_string()))
    }
}
