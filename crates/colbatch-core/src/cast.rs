//! Value conversion between physical types.
//!
//! Casting produces the representation the target column family accepts,
//! already range-checked against the target width, precision and scale.

use std::collections::HashMap;

use colbatch_proto::{Decimal, LogicalType, PhysicalType, Row, TimeUnit, Value};

use crate::column::builder::{fit_decimal, fit_float32, fit_integer};
use crate::error::{Error, Result};
use crate::schema::{is_compatible, physical_type_for, Schema};
use crate::text::decode_str;

const SECONDS_PER_DAY: i64 = 86_400;

/// Per-column conversions resolved against a schema.
///
/// A column is cast only when a logical type is requested for it and the
/// stored type is not already that type's physical representation. Every
/// requested conversion is validated when the plan is built, so casting never
/// starts on a result it cannot finish for type reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastPlan {
    sources: Vec<PhysicalType>,
    targets: Vec<Option<PhysicalType>>,
}

impl CastPlan {
    /// Resolve `requested` (column name to logical type) against `schema`.
    ///
    /// Names not in the schema are ignored. Fails with
    /// [`Error::UnsupportedType`] naming the stored and requested types when a
    /// requested type has no physical mapping or no conversion.
    pub fn new(schema: &Schema, requested: &HashMap<String, LogicalType>) -> Result<Self> {
        let mut sources = Vec::with_capacity(schema.len());
        let mut targets = Vec::with_capacity(schema.len());

        for field in schema.fields() {
            sources.push(field.data_type.clone());
            let target = match requested.get(&field.name) {
                None => None,
                Some(logical) if is_compatible(logical, &field.data_type) => None,
                Some(logical) => {
                    let target = physical_type_for(logical)
                        .map_err(|_| Error::unsupported_cast(&field.data_type, logical))?;
                    if !can_cast(&field.data_type, &target) {
                        return Err(Error::unsupported_cast(&field.data_type, logical));
                    }
                    Some(target)
                }
            };
            targets.push(target);
        }

        Ok(Self { sources, targets })
    }

    /// Check if no column needs converting.
    pub fn is_identity(&self) -> bool {
        self.targets.iter().all(Option::is_none)
    }

    /// Type a column is cast to, or `None` when it passes through.
    pub fn target(&self, column: usize) -> Option<&PhysicalType> {
        self.targets.get(column)?.as_ref()
    }

    /// Number of columns the plan covers.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check if the plan covers no columns.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Cast one row tuple.
    pub fn cast_row(&self, row: &[Value]) -> Result<Row> {
        row.iter()
            .zip(self.sources.iter().zip(&self.targets))
            .map(|(value, (from, to))| match to {
                Some(to) => cast_value(value, from, to),
                None => Ok(value.clone()),
            })
            .collect()
    }
}

/// Whether values stored as `from` can be cast to `to`.
pub fn can_cast(from: &PhysicalType, to: &PhysicalType) -> bool {
    use PhysicalType::*;

    if from == to {
        return true;
    }
    match (from, to) {
        (Null, _) | (_, Utf8) => true,
        (Utf8 | Binary, _) => true,
        (f, t) if f.is_integer() && (t.is_integer() || t.is_float()) => true,
        (f, Decimal128 { .. } | Boolean) if f.is_integer() => true,
        (Boolean, t) if t.is_integer() => true,
        (f, t) if f.is_float() && (t.is_integer() || t.is_float()) => true,
        (f, Decimal128 { .. }) if f.is_float() => true,
        (Decimal128 { .. }, t) if t.is_integer() || t.is_float() => true,
        (Decimal128 { .. }, Decimal128 { .. }) => true,
        (Date32, Timestamp(_)) | (Timestamp(_), Date32) | (Timestamp(_), Timestamp(_)) => true,
        _ => false,
    }
}

/// Cast one value stored as `from` into the representation of `to`.
///
/// `Value::Null` casts to `Value::Null` for every pair.
pub fn cast_value(value: &Value, from: &PhysicalType, to: &PhysicalType) -> Result<Value> {
    if value.is_null() {
        return Ok(Value::Null);
    }
    if from == to {
        return Ok(value.clone());
    }
    if !can_cast(from, to) {
        return Err(Error::UnsupportedType(format!("cannot cast {} to {}", from, to)));
    }

    match (value, to) {
        (_, PhysicalType::Utf8) => render_text(value).map(Value::Text),
        (Value::Text(s), _) => conform(decode_str(s, to)?, to),
        (Value::Bytes(b), PhysicalType::Binary) => Ok(Value::Bytes(b.clone())),
        (Value::Bytes(b), _) => {
            let text = std::str::from_utf8(b).map_err(|_| Error::mismatch(to, "invalid utf-8 bytes"))?;
            conform(decode_str(text, to)?, to)
        }

        (Value::Int(v), _) => cast_integer(i128::from(*v), to),
        (Value::UInt(v), _) => cast_integer(i128::from(*v), to),

        (Value::Bool(b), t) if t.is_integer() => fit_integer(i128::from(*b), t),

        (Value::Float(v), t) if t.is_integer() => {
            let integral = float_to_i128(*v)
                .ok_or_else(|| Error::Overflow(format!("{} is not an integer value for {}", v, t)))?;
            fit_integer(integral, t)
        }
        (Value::Float(v), t) if t.is_float() => conform(Value::Float(*v), t),
        (Value::Float(v), PhysicalType::Decimal128 { .. }) => {
            if !v.is_finite() {
                return Err(Error::Overflow(format!("{} does not fit {}", v, to)));
            }
            // Display never uses exponent notation for f64.
            let decimal = v
                .to_string()
                .parse::<Decimal>()
                .map_err(|_| Error::Overflow(format!("{} does not fit {}", v, to)))?;
            conform(Value::Decimal(decimal), to)
        }

        (Value::Decimal(d), t) if t.is_integer() => {
            let integral = d
                .to_integer()
                .ok_or_else(|| Error::Overflow(format!("{} does not fit {}", d, t)))?;
            fit_integer(integral, t)
        }
        (Value::Decimal(d), t) if t.is_float() => conform(Value::Float(d.to_f64()), t),
        (Value::Decimal(_), PhysicalType::Decimal128 { .. }) => conform(value.clone(), to),

        (Value::Date(days), PhysicalType::Timestamp(unit)) => {
            let seconds = i64::from(*days) * SECONDS_PER_DAY;
            let ticks = convert_ticks(seconds, TimeUnit::Second, *unit)?;
            Ok(Value::Timestamp { value: ticks, unit: *unit })
        }
        (Value::Timestamp { value, unit }, PhysicalType::Date32) => {
            let seconds = convert_ticks(*value, *unit, TimeUnit::Second)?;
            let days = i32::try_from(seconds.div_euclid(SECONDS_PER_DAY))
                .map_err(|_| Error::Overflow(format!("{} does not fit date32", seconds)))?;
            Ok(Value::Date(days))
        }
        (Value::Timestamp { value, unit }, PhysicalType::Timestamp(target)) => Ok(Value::Timestamp {
            value: convert_ticks(*value, *unit, *target)?,
            unit: *target,
        }),

        (other, _) => Err(Error::mismatch(from, other.kind())),
    }
}

fn cast_integer(v: i128, to: &PhysicalType) -> Result<Value> {
    match to {
        PhysicalType::Boolean => Ok(Value::Bool(v != 0)),
        t if t.is_integer() => fit_integer(v, t),
        t if t.is_float() => conform(Value::Float(v as f64), t),
        PhysicalType::Decimal128 { .. } => conform(Value::Decimal(Decimal::from_i128(v, 0)), to),
        other => Err(Error::UnsupportedType(format!("cannot cast integer to {}", other))),
    }
}

/// Convert an epoch offset between units, rounding toward negative infinity.
pub fn convert_ticks(value: i64, from: TimeUnit, to: TimeUnit) -> Result<i64> {
    let from_ticks = from.ticks_per_second();
    let to_ticks = to.ticks_per_second();
    if to_ticks >= from_ticks {
        value.checked_mul(to_ticks / from_ticks).ok_or_else(|| {
            Error::Overflow(format!("{}{} does not fit timestamp[{}]", value, from.suffix(), to.suffix()))
        })
    } else {
        Ok(value.div_euclid(from_ticks / to_ticks))
    }
}

/// Canonical text form of a value.
pub fn render_text(value: &Value) -> Result<String> {
    let text = match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Int(v) => v.to_string(),
        Value::UInt(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Date(_) => value
            .to_naive_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .ok_or_else(|| Error::Overflow(format!("{:?} out of range", value)))?,
        Value::Timestamp { .. } => value
            .to_naive_datetime()
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S%.f").to_string())
            .ok_or_else(|| Error::Overflow(format!("{:?} out of range", value)))?,
        Value::Bytes(b) => String::from_utf8(b.clone())
            .map_err(|_| Error::mismatch(PhysicalType::Utf8, "invalid utf-8 bytes"))?,
        Value::Text(s) => s.clone(),
    };
    Ok(text)
}

/// Range-check a value against its target type.
fn conform(value: Value, to: &PhysicalType) -> Result<Value> {
    match (value, to) {
        (Value::Int(v), t) if t.is_integer() => fit_integer(i128::from(v), t),
        (Value::UInt(v), t) if t.is_integer() => fit_integer(i128::from(v), t),
        (Value::Float(v), PhysicalType::Float32) => fit_float32(v).map(|f| Value::Float(f64::from(f))),
        (Value::Decimal(d), PhysicalType::Decimal128 { precision, scale }) => {
            fit_decimal(&d, *precision, *scale).map(|m| Value::Decimal(Decimal::from_i128(m, *scale)))
        }
        (value, _) => Ok(value),
    }
}

fn float_to_i128(v: f64) -> Option<i128> {
    // 2^64 is exactly representable; no integer column holds it or more.
    const LIMIT: f64 = 18_446_744_073_709_551_616.0;
    if !v.is_finite() || v.fract() != 0.0 || v >= LIMIT || v <= -LIMIT {
        return None;
    }
    Some(v as i128)
}
