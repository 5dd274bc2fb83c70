//! Fetch Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, following the same layout as the other crates in this
//! workspace.

use derive_more::{Display, Error};

/// A fetch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The HTTP client could not be constructed.
    #[display("failed to build HTTP client")]
    Client,
    /// The request failed before a response arrived (DNS, connect, timeout).
    #[display("request failed for {_0}")]
    Request(#[error(not(source))] String),
    /// The server answered with a non-success status code.
    #[display("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    /// Every configured attempt for the page failed.
    #[display("retries exhausted for {_0}")]
    RetriesExhausted(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_) => true,
            // Server-side hiccups and rate limiting are worth another try;
            // 4xx responses are not going to change.
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Client | Self::RetriesExhausted(_) => false,
        }
    }
}
