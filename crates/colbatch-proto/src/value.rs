//! Runtime values carried by rows and columns.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::decimal::Decimal;
use crate::types::TimeUnit;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One field of a result row, or the explicit null marker.
///
/// Each variant is the representation one physical column family accepts:
/// integers of every width arrive as `Int` or `UInt` and are range-checked
/// by the column they land in, dates are days since the Unix epoch and timestamps
/// carry the unit their offset is measured in.
#[derive(Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer of any width up to 64 bits.
    Int(i64),
    /// Unsigned integer of any width up to 64 bits.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// Days since 1970-01-01.
    Date(i32),
    /// Offset from the Unix epoch.
    Timestamp {
        /// Number of `unit` ticks since the epoch.
        value: i64,
        /// Resolution of `value`.
        unit: TimeUnit,
    },
    /// Binary data.
    Bytes(Vec<u8>),
    /// UTF-8 text.
    Text(String),
}

impl Value {
    /// Create a timestamp in microseconds.
    pub fn timestamp_micros(value: i64) -> Self {
        Value::Timestamp {
            value,
            unit: TimeUnit::Microsecond,
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::Timestamp { unit, .. } => match unit {
                TimeUnit::Second => "timestamp[s]",
                TimeUnit::Millisecond => "timestamp[ms]",
                TimeUnit::Microsecond => "timestamp[us]",
                TimeUnit::Nanosecond => "timestamp[ns]",
            },
            Value::Bytes(_) => "bytes",
            Value::Text(_) => "text",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Integer value of either signedness, widened to `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(i128::from(*i)),
            Value::UInt(u) => Some(i128::from(*u)),
            _ => None,
        }
    }

    /// Try to get as f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get as decimal.
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Try to get as string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as bytes reference.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Try to get as a calendar date.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(days) => {
                NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
            }
            _ => None,
        }
    }

    /// Try to get as a UTC date and time.
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp { value, unit } => {
                let ticks = unit.ticks_per_second();
                let secs = value.div_euclid(ticks);
                let nanos = value.rem_euclid(ticks) * (1_000_000_000 / ticks);
                DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?).map(|dt| dt.naive_utc())
            }
            _ => None,
        }
    }
}

/// Days since 1970-01-01 for a calendar date.
pub fn days_since_epoch(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

// Conversion implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(days_since_epoch(v))
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::timestamp_micros(v.and_utc().timestamp_micros())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(true).is_null());

        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int(42).as_i64(), Some(42));
        assert_eq!(Value::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(Value::Int(42).as_f64(), None);
        assert_eq!(Value::UInt(u64::MAX).as_u64(), Some(u64::MAX));
        assert_eq!(Value::UInt(u64::MAX).as_i128(), Some(i128::from(u64::MAX)));
        assert_eq!(Value::Int(-1).as_i128(), Some(-1));
        assert_eq!(Value::Int(-1).as_u64(), None);

        assert_eq!(Value::Text("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Bytes(vec![1, 2, 3]).as_bytes(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_value_conversions() {
        let v: Value = 7i8.into();
        assert_eq!(v, Value::Int(7));

        let v: Value = "hello".into();
        assert_eq!(v, Value::Text("hello".into()));

        let v: Value = None::<i32>.into();
        assert_eq!(v, Value::Null);

        let v: Value = Some(42i32).into();
        assert_eq!(v, Value::Int(42));

        let v: Value = 200u8.into();
        assert_eq!(v, Value::UInt(200));
    }

    #[test]
    fn test_kind_names_timestamp_unit() {
        assert_eq!(Value::timestamp_micros(0).kind(), "timestamp[us]");
        assert_eq!(
            Value::Timestamp {
                value: 0,
                unit: TimeUnit::Millisecond
            }
            .kind(),
            "timestamp[ms]"
        );
        assert_eq!(Value::Decimal(Decimal::from(1)).kind(), "decimal");
    }

    #[test]
    fn test_date_roundtrip_through_chrono() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let v = Value::from(date);
        assert_eq!(v, Value::Date(19723));
        assert_eq!(v.to_naive_date(), Some(date));

        let v = Value::Date(-1);
        assert_eq!(v.to_naive_date(), NaiveDate::from_ymd_opt(1969, 12, 31));
    }

    #[test]
    fn test_timestamp_to_datetime() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 15, 250)
            .unwrap();
        let v = Value::from(dt);
        assert_eq!(v, Value::timestamp_micros(1_704_112_215_000_250));
        assert_eq!(v.to_naive_datetime(), Some(dt));

        let v = Value::Timestamp {
            value: -1,
            unit: TimeUnit::Millisecond,
        };
        let expected = NaiveDate::from_ymd_opt(1969, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 999)
            .unwrap();
        assert_eq!(v.to_naive_datetime(), Some(expected));
    }
}
