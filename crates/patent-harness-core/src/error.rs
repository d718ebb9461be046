//! Typed failures surfaced by the core.
//!
//! Numeric edge cases (empty documents, zero-norm vectors) are not errors;
//! they resolve to a similarity of `0.0`. Only structural misuse and
//! lookup/storage failures reach the caller.

use thiserror::Error;

/// Error type for core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed input passed between steps (mismatched vector lengths,
    /// non-finite threshold, unparseable filter field).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested patent does not exist in the backing store.
    #[error("patent not found: {0}")]
    NotFound(String),

    /// The backing store failed while fetching data.
    #[error("store error: {0}")]
    Store(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}
