//! Core error types.

use thiserror::Error;

use colbatch_proto::{LogicalType, PhysicalType};

/// Errors raised while inferring, materializing, or viewing a batch.
///
/// Every variant is terminal for the operation that raised it: a failed
/// materialization never yields a partial batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A logical type has no physical mapping, or a cast has no conversion.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// A value's representation does not match what its column expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Representation the column accepts.
        expected: String,
        /// Representation that was supplied.
        actual: String,
    },

    /// A value does not fit the column's width, precision, or scale.
    #[error("overflow: {0}")]
    Overflow(String),

    /// A row carries a different number of fields than the schema.
    #[error("row {row} has {actual} fields, schema has {expected}")]
    RowShapeMismatch {
        /// Zero-based index of the offending row.
        row: usize,
        /// Number of columns in the schema.
        expected: usize,
        /// Number of fields in the row.
        actual: usize,
    },

    /// A builder was used after `finish`.
    #[error("column builder already finalized")]
    BuilderFinalized,

    /// The external row cursor failed.
    #[error("row cursor error: {0}")]
    Cursor(String),

    /// Protocol value error.
    #[error("protocol error: {0}")]
    Protocol(#[from] colbatch_proto::Error),
}

impl Error {
    /// A logical type with no physical representation.
    pub fn unsupported_logical(logical: &LogicalType) -> Self {
        Error::UnsupportedType(format!("no physical type for {}", logical))
    }

    /// A requested cast with no conversion from the stored type.
    pub fn unsupported_cast(stored: &PhysicalType, requested: &LogicalType) -> Self {
        Error::UnsupportedType(format!("cannot cast {} to {}", stored, requested))
    }

    /// A value of the wrong representation.
    pub fn mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::unsupported_cast(&PhysicalType::Date32, &LogicalType::Boolean);
        assert_eq!(err.to_string(), "unsupported type: cannot cast date32 to boolean");

        let err = Error::mismatch(PhysicalType::Int32, "text");
        assert_eq!(err.to_string(), "type mismatch: expected int32, got text");

        let err = Error::RowShapeMismatch {
            row: 3,
            expected: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("row 3"));
    }

    #[test]
    fn test_protocol_error_conversion() {
        let err: Error = colbatch_proto::Error::InvalidDecimal("x".into()).into();
        assert!(matches!(err, Error::Protocol(_)));
    }
}
