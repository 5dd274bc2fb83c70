//! Model Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, shared in style across the workspace crates.

use derive_more::{Display, Error};

/// A model-building error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Lookup-or-create resolution cannot fail in normal operation; these are
/// defensive guards against a caller wiring the builder incorrectly.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A talk was fed to the builder with a dangling or missing reference.
    #[display("entity resolution failed: {_0}")]
    Resolution(#[error(not(source))] String),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
