//! Pipeline Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, shared in style across the workspace crates.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A pipeline error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Only index fetch failure aborts a run; everything else is either
/// skipped upstream or surfaces here once the batch is already best-effort.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("could not fetch the conference index")]
    Index,
    #[display("configuration error")]
    Config,
    #[display("model building error")]
    Model,
    #[display("could not write export artifact: {}", _0.display())]
    Export(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Index)
    }
}
