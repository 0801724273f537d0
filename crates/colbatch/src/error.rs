//! Error types.

use thiserror::Error;

/// Errors returned by query execution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Materialization, decoding, or casting failed.
    #[error(transparent)]
    Core(#[from] colbatch_core::Error),

    /// The query source failed to run the statement.
    #[error("query source error: {0}")]
    Source(String),
}

/// Result type for query execution.
pub type Result<T> = std::result::Result<T, Error>;
