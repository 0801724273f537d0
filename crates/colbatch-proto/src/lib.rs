//! colbatch value and type vocabulary.
//!
//! This crate defines the types every colbatch layer speaks: the values a
//! result row carries, the logical types a source protocol declares, and the
//! physical types a columnar batch stores.
//!
//! # Modules
//!
//! - [`value`] - Runtime values for row fields and column slots
//! - [`decimal`] - Sign/digits/scale decimal numbers
//! - [`types`] - Logical and physical column types
//! - [`error`] - Protocol error types
//!
//! # Serialization
//!
//! All types in this crate derive `rkyv::Archive`, `rkyv::Serialize`, and
//! `rkyv::Deserialize`, plus the serde traits:
//!
//! ```ignore
//! use colbatch_proto::Value;
//!
//! let value = Value::Text("hello".into());
//! let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&value).unwrap();
//! let archived = rkyv::access::<ArchivedValue, rkyv::rancor::Error>(&bytes).unwrap();
//! let deserialized: Value = rkyv::deserialize::<Value, rkyv::rancor::Error>(archived).unwrap();
//! ```

pub mod decimal;
pub mod error;
pub mod types;
pub mod value;

pub use decimal::{Decimal, MAX_DECIMAL_PRECISION};
pub use error::Error;
pub use types::{LogicalType, PhysicalType, TimeUnit};
pub use value::{days_since_epoch, Value};

/// One result row: field values in column order.
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_serialization_roundtrip() {
        let values = vec![
            Value::Null,
            Value::Bool(true),
            Value::Int(-42),
            Value::Int(i64::MAX),
            Value::UInt(u64::MAX),
            Value::Float(std::f64::consts::PI),
            Value::Decimal("-123.450".parse().unwrap()),
            Value::Date(19723),
            Value::timestamp_micros(1_704_067_200_000_000),
            Value::Bytes(vec![0, 1, 2, 255]),
            Value::Text("hello world".into()),
        ];

        for value in values {
            let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&value).unwrap();
            let archived =
                rkyv::access::<value::ArchivedValue, rkyv::rancor::Error>(&bytes).unwrap();
            let deserialized: Value =
                rkyv::deserialize::<Value, rkyv::rancor::Error>(archived).unwrap();
            assert_eq!(value, deserialized);
        }
    }

    #[test]
    fn test_type_serialization_roundtrip() {
        let ty = PhysicalType::Timestamp(TimeUnit::Millisecond);
        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&ty).unwrap();
        let archived =
            rkyv::access::<types::ArchivedPhysicalType, rkyv::rancor::Error>(&bytes).unwrap();
        let deserialized: PhysicalType =
            rkyv::deserialize::<PhysicalType, rkyv::rancor::Error>(archived).unwrap();
        assert_eq!(ty, deserialized);
    }

    #[test]
    fn test_value_json_shape() {
        let json = serde_json::to_string(&Value::Int(1)).unwrap();
        assert_eq!(json, r#"{"Int":1}"#);

        let ty: LogicalType = serde_json::from_str(r#"{"Decimal":{"precision":10,"scale":2}}"#).unwrap();
        assert_eq!(ty, LogicalType::decimal(10, 2));
    }
}
