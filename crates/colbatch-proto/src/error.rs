//! Protocol error types.

use thiserror::Error;

/// Errors raised while building or parsing protocol values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text could not be parsed as a decimal number.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),

    /// A value is outside what its representation can carry.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}
