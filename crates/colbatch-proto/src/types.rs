//! Logical and physical column type definitions.

use std::fmt;
use std::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::Error;

/// Resolution of a timestamp column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum TimeUnit {
    /// Whole seconds.
    Second,
    /// Milliseconds.
    Millisecond,
    /// Microseconds.
    Microsecond,
    /// Nanoseconds.
    Nanosecond,
}

impl TimeUnit {
    /// Number of ticks of this unit in one second.
    pub fn ticks_per_second(&self) -> i64 {
        match self {
            TimeUnit::Second => 1,
            TimeUnit::Millisecond => 1_000,
            TimeUnit::Microsecond => 1_000_000,
            TimeUnit::Nanosecond => 1_000_000_000,
        }
    }

    /// Short suffix used when rendering types, e.g. `us`.
    pub fn suffix(&self) -> &'static str {
        match self {
            TimeUnit::Second => "s",
            TimeUnit::Millisecond => "ms",
            TimeUnit::Microsecond => "us",
            TimeUnit::Nanosecond => "ns",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    /// Parse a unit suffix: `s`, `ms`, `us` or `ns`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(TimeUnit::Second),
            "ms" => Ok(TimeUnit::Millisecond),
            "us" => Ok(TimeUnit::Microsecond),
            "ns" => Ok(TimeUnit::Nanosecond),
            other => Err(Error::InvalidValue(format!("unknown time unit '{}'", other))),
        }
    }
}

/// Declared type of a result column, as reported by the source protocol.
///
/// These are the families a MySQL or PostgreSQL result header can carry.
/// `Enum`, `Set` and `Geometry` are declared so a result containing them can
/// be rejected explicitly instead of being misread.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum LogicalType {
    /// 8-bit integer (`TINYINT`).
    TinyInteger,
    /// 16-bit integer (`SMALLINT`, `YEAR`).
    SmallInteger,
    /// 32-bit integer (`INT`, `MEDIUMINT`, `integer`).
    Integer,
    /// 64-bit integer (`BIGINT`).
    BigInteger,
    /// Single precision float (`FLOAT`, `real`).
    Real,
    /// Double precision float (`DOUBLE`, `double precision`).
    Float,
    /// Fixed-point decimal.
    Decimal {
        /// Total number of significant digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Boolean (`boolean`, `TINYINT(1)`, `BIT(1)`).
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day.
    Time,
    /// Long character data (`TEXT`).
    Text,
    /// Short character data (`VARCHAR`, `CHAR`).
    String,
    /// Binary data (`BLOB`, `VARBINARY`, `bytea`).
    Binary,
    /// A column that is always NULL.
    Null,
    /// MySQL `ENUM`.
    Enum,
    /// MySQL `SET`.
    Set,
    /// MySQL `GEOMETRY`.
    Geometry,
}

impl LogicalType {
    /// Create a decimal type.
    pub fn decimal(precision: u8, scale: u8) -> Self {
        LogicalType::Decimal { precision, scale }
    }

    /// Check if this type is an integer family.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            LogicalType::TinyInteger
                | LogicalType::SmallInteger
                | LogicalType::Integer
                | LogicalType::BigInteger
        )
    }

    /// Check if this type is character data.
    pub fn is_textual(&self) -> bool {
        matches!(self, LogicalType::Text | LogicalType::String)
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::TinyInteger => f.write_str("tinyint"),
            LogicalType::SmallInteger => f.write_str("smallint"),
            LogicalType::Integer => f.write_str("integer"),
            LogicalType::BigInteger => f.write_str("bigint"),
            LogicalType::Real => f.write_str("real"),
            LogicalType::Float => f.write_str("float"),
            LogicalType::Decimal { precision, scale } => {
                write!(f, "decimal({}, {})", precision, scale)
            }
            LogicalType::Boolean => f.write_str("boolean"),
            LogicalType::Date => f.write_str("date"),
            LogicalType::DateTime => f.write_str("datetime"),
            LogicalType::Time => f.write_str("time"),
            LogicalType::Text => f.write_str("text"),
            LogicalType::String => f.write_str("string"),
            LogicalType::Binary => f.write_str("binary"),
            LogicalType::Null => f.write_str("null"),
            LogicalType::Enum => f.write_str("enum"),
            LogicalType::Set => f.write_str("set"),
            LogicalType::Geometry => f.write_str("geometry"),
        }
    }
}

/// Columnar storage representation of a column.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub enum PhysicalType {
    /// Every slot is null; no value buffer.
    Null,
    /// Bit-packed booleans.
    Boolean,
    /// 8-bit signed integer.
    Int8,
    /// 16-bit signed integer.
    Int16,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 8-bit unsigned integer.
    UInt8,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit unsigned integer.
    UInt64,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
    /// 128-bit fixed-point decimal.
    Decimal128 {
        /// Total number of significant digits.
        precision: u8,
        /// Digits after the decimal point.
        scale: u8,
    },
    /// Days since the Unix epoch.
    Date32,
    /// Offset from the Unix epoch at the given unit.
    Timestamp(TimeUnit),
    /// Variable-width bytes.
    Binary,
    /// Variable-width UTF-8 text.
    Utf8,
}

impl PhysicalType {
    /// Create a decimal128 type.
    pub fn decimal128(precision: u8, scale: u8) -> Self {
        PhysicalType::Decimal128 { precision, scale }
    }

    /// Check if this type is an integer of any width or signedness.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            PhysicalType::Int8 | PhysicalType::Int16 | PhysicalType::Int32 | PhysicalType::Int64
        ) || self.is_unsigned_integer()
    }

    /// Check if this type is an unsigned integer.
    pub fn is_unsigned_integer(&self) -> bool {
        matches!(
            self,
            PhysicalType::UInt8 | PhysicalType::UInt16 | PhysicalType::UInt32 | PhysicalType::UInt64
        )
    }

    /// Unsigned integer of the same width, for a signed integer type.
    pub fn to_unsigned(&self) -> Option<PhysicalType> {
        match self {
            PhysicalType::Int8 => Some(PhysicalType::UInt8),
            PhysicalType::Int16 => Some(PhysicalType::UInt16),
            PhysicalType::Int32 => Some(PhysicalType::UInt32),
            PhysicalType::Int64 => Some(PhysicalType::UInt64),
            _ => None,
        }
    }

    /// Check if this type is a float.
    pub fn is_float(&self) -> bool {
        matches!(self, PhysicalType::Float32 | PhysicalType::Float64)
    }

    /// Check if values of this type are stored in an offsets + data layout.
    pub fn is_variable_width(&self) -> bool {
        matches!(self, PhysicalType::Binary | PhysicalType::Utf8)
    }
}

impl fmt::Display for PhysicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicalType::Null => f.write_str("null"),
            PhysicalType::Boolean => f.write_str("bool"),
            PhysicalType::Int8 => f.write_str("int8"),
            PhysicalType::Int16 => f.write_str("int16"),
            PhysicalType::Int32 => f.write_str("int32"),
            PhysicalType::Int64 => f.write_str("int64"),
            PhysicalType::UInt8 => f.write_str("uint8"),
            PhysicalType::UInt16 => f.write_str("uint16"),
            PhysicalType::UInt32 => f.write_str("uint32"),
            PhysicalType::UInt64 => f.write_str("uint64"),
            PhysicalType::Float32 => f.write_str("float32"),
            PhysicalType::Float64 => f.write_str("float64"),
            PhysicalType::Decimal128 { precision, scale } => {
                write!(f, "decimal128({}, {})", precision, scale)
            }
            PhysicalType::Date32 => f.write_str("date32"),
            PhysicalType::Timestamp(unit) => write!(f, "timestamp[{}]", unit.suffix()),
            PhysicalType::Binary => f.write_str("binary"),
            PhysicalType::Utf8 => f.write_str("utf8"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_display() {
        assert_eq!(LogicalType::decimal(10, 3).to_string(), "decimal(10, 3)");
        assert_eq!(LogicalType::BigInteger.to_string(), "bigint");
        assert_eq!(
            PhysicalType::Timestamp(TimeUnit::Microsecond).to_string(),
            "timestamp[us]"
        );
        assert_eq!(PhysicalType::decimal128(38, 6).to_string(), "decimal128(38, 6)");
    }

    #[test]
    fn test_type_checks() {
        assert!(LogicalType::TinyInteger.is_integer());
        assert!(!LogicalType::Real.is_integer());
        assert!(LogicalType::String.is_textual());

        assert!(PhysicalType::Int16.is_integer());
        assert!(PhysicalType::UInt64.is_integer());
        assert!(!PhysicalType::Int64.is_unsigned_integer());
        assert_eq!(PhysicalType::Int32.to_unsigned(), Some(PhysicalType::UInt32));
        assert_eq!(PhysicalType::Float64.to_unsigned(), None);
        assert_eq!(PhysicalType::UInt16.to_string(), "uint16");
        assert!(PhysicalType::Float32.is_float());
        assert!(PhysicalType::Utf8.is_variable_width());
        assert!(!PhysicalType::Date32.is_variable_width());
    }

    #[test]
    fn test_time_unit_ticks() {
        assert_eq!(TimeUnit::Second.ticks_per_second(), 1);
        assert_eq!(TimeUnit::Microsecond.ticks_per_second(), 1_000_000);
        assert_eq!(TimeUnit::Nanosecond.suffix(), "ns");
    }

    #[test]
    fn test_time_unit_parse() {
        assert_eq!("ms".parse::<TimeUnit>().unwrap(), TimeUnit::Millisecond);
        assert_eq!("us".parse::<TimeUnit>().unwrap(), TimeUnit::Microsecond);
        assert!(matches!("h".parse::<TimeUnit>(), Err(Error::InvalidValue(_))));
    }
}
