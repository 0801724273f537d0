//! Column builders, one per physical family.
//!
//! A builder accepts exactly the [`Value`] representation its physical type
//! implies and never coerces between units or precisions. Integers are the
//! one family that accepts a wider input: every integer arrives as
//! `Value::Int(i64)` or `Value::UInt(u64)` and is range-checked against the
//! column width and signedness.

use colbatch_proto::{Decimal, PhysicalType, TimeUnit, Value};

use super::{Bitmap, Column, ColumnData, VarBuffer};
use crate::error::{Error, Result};

/// Append-only builder that freezes into a [`Column`].
pub trait ColumnBuilder: Send {
    /// Storage type being built.
    fn data_type(&self) -> &PhysicalType;

    /// Append a value. `Value::Null` appends a null slot.
    fn append(&mut self, value: Value) -> Result<()>;

    /// Append a null slot.
    fn append_null(&mut self) -> Result<()>;

    /// Number of slots appended so far.
    fn len(&self) -> usize;

    /// Check if nothing has been appended.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freeze the builder. Any later call fails with `BuilderFinalized`.
    fn finish(&mut self) -> Result<Column>;
}

/// Create the builder for a physical type.
pub fn builder_for(data_type: &PhysicalType, capacity: usize) -> Box<dyn ColumnBuilder> {
    match data_type {
        PhysicalType::Null => Box::new(NullBuilder::new()),
        PhysicalType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        PhysicalType::Int8 => Box::new(IntegerBuilder::<i8>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Int16 => Box::new(IntegerBuilder::<i16>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Int32 => Box::new(IntegerBuilder::<i32>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Int64 => Box::new(IntegerBuilder::<i64>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::UInt8 => Box::new(IntegerBuilder::<u8>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::UInt16 => Box::new(IntegerBuilder::<u16>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::UInt32 => Box::new(IntegerBuilder::<u32>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::UInt64 => Box::new(IntegerBuilder::<u64>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Float32 => Box::new(FloatBuilder::<f32>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Float64 => Box::new(FloatBuilder::<f64>::with_capacity(data_type.clone(), capacity)),
        PhysicalType::Decimal128 { precision, scale } => {
            Box::new(DecimalBuilder::with_capacity(*precision, *scale, capacity))
        }
        PhysicalType::Date32 => Box::new(Date32Builder::with_capacity(capacity)),
        PhysicalType::Timestamp(unit) => Box::new(TimestampBuilder::with_capacity(*unit, capacity)),
        PhysicalType::Binary => Box::new(VarBinaryBuilder::binary(capacity)),
        PhysicalType::Utf8 => Box::new(VarBinaryBuilder::utf8(capacity)),
    }
}

/// Range-check an integer against an integer column type, producing the
/// value that column accepts: `Value::UInt` for unsigned widths,
/// `Value::Int` otherwise.
pub(crate) fn fit_integer(value: i128, data_type: &PhysicalType) -> Result<Value> {
    let overflow = || Error::Overflow(format!("{} does not fit {}", value, data_type));
    let fits = match data_type {
        PhysicalType::Int8 => i8::try_from(value).is_ok(),
        PhysicalType::Int16 => i16::try_from(value).is_ok(),
        PhysicalType::Int32 => i32::try_from(value).is_ok(),
        PhysicalType::Int64 => i64::try_from(value).is_ok(),
        PhysicalType::UInt8 => u8::try_from(value).is_ok(),
        PhysicalType::UInt16 => u16::try_from(value).is_ok(),
        PhysicalType::UInt32 => u32::try_from(value).is_ok(),
        PhysicalType::UInt64 => u64::try_from(value).is_ok(),
        other => return Err(Error::mismatch(other, "int")),
    };
    if !fits {
        return Err(overflow());
    }
    if data_type.is_unsigned_integer() {
        u64::try_from(value).map(Value::UInt).map_err(|_| overflow())
    } else {
        i64::try_from(value).map(Value::Int).map_err(|_| overflow())
    }
}

/// Mantissa of `value` at `scale`, checked against `precision`.
pub(crate) fn fit_decimal(value: &Decimal, precision: u8, scale: u8) -> Result<i128> {
    let target = PhysicalType::Decimal128 { precision, scale };
    let rescaled = value
        .rescale(scale)
        .ok_or_else(|| Error::Overflow(format!("{} does not fit {}", value, target)))?;
    if rescaled.precision() > precision {
        return Err(Error::Overflow(format!("{} does not fit {}", value, target)));
    }
    rescaled
        .to_i128()
        .ok_or_else(|| Error::Overflow(format!("{} does not fit {}", value, target)))
}

/// Narrow a float to `f32`. Finite values beyond the `f32` range overflow.
pub(crate) fn fit_float32(value: f64) -> Result<f32> {
    if value.is_finite() && value.abs() > f64::from(f32::MAX) {
        return Err(Error::Overflow(format!("{} does not fit float32", value)));
    }
    Ok(value as f32)
}

/// Null bitmap plus the finalized flag shared by every builder.
#[derive(Debug, Default)]
struct Slots {
    nulls: Bitmap,
    finished: bool,
}

impl Slots {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            nulls: Bitmap::with_capacity(capacity),
            finished: false,
        }
    }

    fn check_open(&self) -> Result<()> {
        if self.finished {
            return Err(Error::BuilderFinalized);
        }
        Ok(())
    }

    fn seal(&mut self) -> Result<Bitmap> {
        self.check_open()?;
        self.finished = true;
        Ok(std::mem::take(&mut self.nulls))
    }
}

/// Builder for all-null columns.
#[derive(Debug, Default)]
pub struct NullBuilder {
    slots: Slots,
}

impl NullBuilder {
    /// Create a null builder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ColumnBuilder for NullBuilder {
    fn data_type(&self) -> &PhysicalType {
        &PhysicalType::Null
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            other => Err(Error::mismatch(PhysicalType::Null, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        Ok(Column::new(PhysicalType::Null, ColumnData::Null, nulls))
    }
}

/// Builder for bit-packed boolean columns.
#[derive(Debug, Default)]
pub struct BooleanBuilder {
    values: Bitmap,
    slots: Slots,
}

impl BooleanBuilder {
    /// Create a boolean builder with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Bitmap::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl ColumnBuilder for BooleanBuilder {
    fn data_type(&self) -> &PhysicalType {
        &PhysicalType::Boolean
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Bool(b) => {
                self.values.push(b);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(PhysicalType::Boolean, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(false);
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(PhysicalType::Boolean, ColumnData::Boolean(values), nulls))
    }
}

/// Native storage of an integer column.
pub trait IntegerNative: Copy + Default + Send + TryFrom<i64> + TryFrom<u64> + 'static {
    /// Wrap a finished buffer in its column variant.
    fn into_data(values: Vec<Self>) -> ColumnData;
}

impl IntegerNative for i8 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Int8(values)
    }
}

impl IntegerNative for i16 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Int16(values)
    }
}

impl IntegerNative for i32 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Int32(values)
    }
}

impl IntegerNative for i64 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Int64(values)
    }
}

impl IntegerNative for u8 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::UInt8(values)
    }
}

impl IntegerNative for u16 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::UInt16(values)
    }
}

impl IntegerNative for u32 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::UInt32(values)
    }
}

impl IntegerNative for u64 {
    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::UInt64(values)
    }
}

/// Builder for integer columns of native type `T`.
#[derive(Debug)]
pub struct IntegerBuilder<T: IntegerNative> {
    data_type: PhysicalType,
    values: Vec<T>,
    slots: Slots,
}

impl<T: IntegerNative> IntegerBuilder<T> {
    /// Create an integer builder.
    pub fn with_capacity(data_type: PhysicalType, capacity: usize) -> Self {
        Self {
            data_type,
            values: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl<T: IntegerNative> ColumnBuilder for IntegerBuilder<T> {
    fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Int(v) => {
                let native = T::try_from(v).map_err(|_| {
                    Error::Overflow(format!("{} does not fit {}", v, self.data_type))
                })?;
                self.values.push(native);
                self.slots.nulls.push(false);
                Ok(())
            }
            Value::UInt(v) => {
                let native = T::try_from(v).map_err(|_| {
                    Error::Overflow(format!("{} does not fit {}", v, self.data_type))
                })?;
                self.values.push(native);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(&self.data_type, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(T::default());
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(self.data_type.clone(), T::into_data(values), nulls))
    }
}

/// Native storage of a float column.
pub trait FloatNative: Copy + Default + Send + 'static {
    /// Narrow an `f64` to this width.
    fn from_f64(value: f64) -> Result<Self>;

    /// Wrap a finished buffer in its column variant.
    fn into_data(values: Vec<Self>) -> ColumnData;
}

impl FloatNative for f32 {
    fn from_f64(value: f64) -> Result<Self> {
        fit_float32(value)
    }

    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Float32(values)
    }
}

impl FloatNative for f64 {
    fn from_f64(value: f64) -> Result<Self> {
        Ok(value)
    }

    fn into_data(values: Vec<Self>) -> ColumnData {
        ColumnData::Float64(values)
    }
}

/// Builder for float columns of width `T`.
#[derive(Debug)]
pub struct FloatBuilder<T: FloatNative> {
    data_type: PhysicalType,
    values: Vec<T>,
    slots: Slots,
}

impl<T: FloatNative> FloatBuilder<T> {
    /// Create a float builder.
    pub fn with_capacity(data_type: PhysicalType, capacity: usize) -> Self {
        Self {
            data_type,
            values: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl<T: FloatNative> ColumnBuilder for FloatBuilder<T> {
    fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Float(v) => {
                self.values.push(T::from_f64(v)?);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(&self.data_type, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(T::default());
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(self.data_type.clone(), T::into_data(values), nulls))
    }
}

/// Builder for decimal128 columns.
///
/// Values with a smaller scale are rescaled exactly; values with more
/// non-zero fractional digits than the column scale, or more digits than
/// its precision, overflow.
#[derive(Debug)]
pub struct DecimalBuilder {
    data_type: PhysicalType,
    precision: u8,
    scale: u8,
    values: Vec<i128>,
    slots: Slots,
}

impl DecimalBuilder {
    /// Create a decimal builder.
    pub fn with_capacity(precision: u8, scale: u8, capacity: usize) -> Self {
        Self {
            data_type: PhysicalType::Decimal128 { precision, scale },
            precision,
            scale,
            values: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl ColumnBuilder for DecimalBuilder {
    fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Decimal(d) => {
                self.values.push(fit_decimal(&d, self.precision, self.scale)?);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(&self.data_type, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(0);
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(self.data_type.clone(), ColumnData::Decimal128(values), nulls))
    }
}

/// Builder for date32 columns.
#[derive(Debug, Default)]
pub struct Date32Builder {
    values: Vec<i32>,
    slots: Slots,
}

impl Date32Builder {
    /// Create a date builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl ColumnBuilder for Date32Builder {
    fn data_type(&self) -> &PhysicalType {
        &PhysicalType::Date32
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Date(days) => {
                self.values.push(days);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(PhysicalType::Date32, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(0);
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(PhysicalType::Date32, ColumnData::Date32(values), nulls))
    }
}

/// Builder for timestamp columns at a fixed unit.
#[derive(Debug)]
pub struct TimestampBuilder {
    data_type: PhysicalType,
    unit: TimeUnit,
    values: Vec<i64>,
    slots: Slots,
}

impl TimestampBuilder {
    /// Create a timestamp builder.
    pub fn with_capacity(unit: TimeUnit, capacity: usize) -> Self {
        Self {
            data_type: PhysicalType::Timestamp(unit),
            unit,
            values: Vec::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl ColumnBuilder for TimestampBuilder {
    fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Timestamp { value, unit } if unit == self.unit => {
                self.values.push(value);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(&self.data_type, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.values.push(0);
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let values = std::mem::take(&mut self.values);
        Ok(Column::new(self.data_type.clone(), ColumnData::Timestamp(values), nulls))
    }
}

/// Builder for binary and UTF-8 columns.
#[derive(Debug)]
pub struct VarBinaryBuilder {
    data_type: PhysicalType,
    buffer: VarBuffer,
    slots: Slots,
}

impl VarBinaryBuilder {
    /// Create a builder for binary values.
    pub fn binary(capacity: usize) -> Self {
        Self {
            data_type: PhysicalType::Binary,
            buffer: VarBuffer::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }

    /// Create a builder for UTF-8 text.
    pub fn utf8(capacity: usize) -> Self {
        Self {
            data_type: PhysicalType::Utf8,
            buffer: VarBuffer::with_capacity(capacity),
            slots: Slots::with_capacity(capacity),
        }
    }
}

impl ColumnBuilder for VarBinaryBuilder {
    fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    fn append(&mut self, value: Value) -> Result<()> {
        self.slots.check_open()?;
        match value {
            Value::Null => self.append_null(),
            Value::Text(s) if self.data_type == PhysicalType::Utf8 => {
                self.buffer.push(s.as_bytes());
                self.slots.nulls.push(false);
                Ok(())
            }
            Value::Bytes(b) if self.data_type == PhysicalType::Binary => {
                self.buffer.push(&b);
                self.slots.nulls.push(false);
                Ok(())
            }
            other => Err(Error::mismatch(&self.data_type, other.kind())),
        }
    }

    fn append_null(&mut self) -> Result<()> {
        self.slots.check_open()?;
        self.buffer.push(&[]);
        self.slots.nulls.push(true);
        Ok(())
    }

    fn len(&self) -> usize {
        self.slots.nulls.len()
    }

    fn finish(&mut self) -> Result<Column> {
        let nulls = self.slots.seal()?;
        let buffer = std::mem::replace(&mut self.buffer, VarBuffer::with_capacity(0));
        let data = match self.data_type {
            PhysicalType::Utf8 => ColumnData::Utf8(buffer),
            _ => ColumnData::Binary(buffer),
        };
        Ok(Column::new(self.data_type.clone(), data, nulls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(data_type: &PhysicalType, values: Vec<Value>) -> Result<Column> {
        let mut builder = builder_for(data_type, values.len());
        for value in values {
            builder.append(value)?;
        }
        builder.finish()
    }

    #[test]
    fn test_integer_nulls_and_values() {
        let column = build(
            &PhysicalType::Int32,
            vec![Value::Int(1), Value::Null, Value::Int(-3)],
        )
        .unwrap();

        assert_eq!(column.len(), 3);
        assert_eq!(column.null_count(), 1);
        assert!(column.is_null(1));
        assert_eq!(column.data(), &ColumnData::Int32(vec![1, 0, -3]));
        assert_eq!(
            column.iter().collect::<Vec<_>>(),
            vec![Value::Int(1), Value::Null, Value::Int(-3)]
        );
    }

    #[test]
    fn test_unsigned_integers() {
        let column = build(
            &PhysicalType::UInt64,
            vec![Value::UInt(u64::MAX), Value::Null, Value::Int(7)],
        )
        .unwrap();
        assert_eq!(column.data(), &ColumnData::UInt64(vec![u64::MAX, 0, 7]));
        assert_eq!(
            column.iter().collect::<Vec<_>>(),
            vec![Value::UInt(u64::MAX), Value::Null, Value::UInt(7)]
        );

        let column = build(&PhysicalType::UInt32, vec![Value::UInt(3_000_000_000)]).unwrap();
        assert_eq!(column.value(0), Some(Value::UInt(3_000_000_000)));

        let err = build(&PhysicalType::UInt8, vec![Value::Int(-1)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
        let err = build(&PhysicalType::UInt8, vec![Value::UInt(256)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
        let err = build(&PhysicalType::Int64, vec![Value::UInt(u64::MAX)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
    }

    #[test]
    fn test_fit_integer_picks_signedness() {
        assert_eq!(fit_integer(5, &PhysicalType::UInt16).unwrap(), Value::UInt(5));
        assert_eq!(fit_integer(-5, &PhysicalType::Int16).unwrap(), Value::Int(-5));
        assert!(matches!(fit_integer(-5, &PhysicalType::UInt16), Err(Error::Overflow(_))));
        assert!(matches!(
            fit_integer(i128::from(u64::MAX) + 1, &PhysicalType::UInt64),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_integer_overflow() {
        let err = build(&PhysicalType::Int8, vec![Value::Int(128)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));

        let err = build(&PhysicalType::Int16, vec![Value::Int(-40_000)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));

        assert!(build(&PhysicalType::Int8, vec![Value::Int(-128)]).is_ok());
        assert!(build(&PhysicalType::Int64, vec![Value::Int(i64::MIN)]).is_ok());
    }

    #[test]
    fn test_mismatch_names_both_sides() {
        let err = build(&PhysicalType::Int32, vec![Value::Text("1".into())]).unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                expected: "int32".into(),
                actual: "text".into()
            }
        );

        let err = build(&PhysicalType::Binary, vec![Value::Text("x".into())]).unwrap_err();
        assert_eq!(err, Error::mismatch("binary", "text"));
    }

    #[test]
    fn test_timestamp_unit_is_not_coerced() {
        let err = build(
            &PhysicalType::Timestamp(TimeUnit::Microsecond),
            vec![Value::Timestamp {
                value: 1,
                unit: TimeUnit::Millisecond,
            }],
        )
        .unwrap_err();
        assert_eq!(err, Error::mismatch("timestamp[us]", "timestamp[ms]"));

        let column = build(
            &PhysicalType::Timestamp(TimeUnit::Millisecond),
            vec![Value::Timestamp {
                value: 1_500,
                unit: TimeUnit::Millisecond,
            }],
        )
        .unwrap();
        assert_eq!(
            column.value(0),
            Some(Value::Timestamp {
                value: 1_500,
                unit: TimeUnit::Millisecond
            })
        );
    }

    #[test]
    fn test_decimal_rescale_and_overflow() {
        let column = build(
            &PhysicalType::decimal128(5, 2),
            vec![
                Value::Decimal("1.5".parse().unwrap()),
                Value::Decimal("-123.450".parse().unwrap()),
                Value::Null,
            ],
        )
        .unwrap();
        assert_eq!(column.data(), &ColumnData::Decimal128(vec![150, -12345, 0]));
        assert_eq!(column.value(0), Some(Value::Decimal(Decimal::new(false, 150, 2))));

        // Too many digits for the precision.
        let err = build(
            &PhysicalType::decimal128(5, 2),
            vec![Value::Decimal("1234.5".parse().unwrap())],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));

        // Fractional digits beyond the scale.
        let err = build(
            &PhysicalType::decimal128(5, 2),
            vec![Value::Decimal("1.234".parse().unwrap())],
        )
        .unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));
    }

    #[test]
    fn test_float32_range() {
        let column = build(&PhysicalType::Float32, vec![Value::Float(1.5)]).unwrap();
        assert_eq!(column.value(0), Some(Value::Float(1.5)));

        let err = build(&PhysicalType::Float32, vec![Value::Float(1e300)]).unwrap_err();
        assert!(matches!(err, Error::Overflow(_)));

        let err = build(&PhysicalType::Float64, vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_boolean_and_null_columns() {
        let column = build(
            &PhysicalType::Boolean,
            vec![Value::Bool(true), Value::Null, Value::Bool(false)],
        )
        .unwrap();
        assert_eq!(
            column.iter().collect::<Vec<_>>(),
            vec![Value::Bool(true), Value::Null, Value::Bool(false)]
        );

        let column = build(&PhysicalType::Null, vec![Value::Null, Value::Null]).unwrap();
        assert_eq!(column.len(), 2);
        assert_eq!(column.null_count(), 2);

        let err = build(&PhysicalType::Null, vec![Value::Int(1)]).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_utf8_layout() {
        let column = build(
            &PhysicalType::Utf8,
            vec![Value::Text("héllo".into()), Value::Null, Value::Text("".into())],
        )
        .unwrap();
        match column.data() {
            ColumnData::Utf8(buf) => {
                assert_eq!(buf.offsets(), &[0, 6, 6, 6]);
                assert_eq!(buf.data(), "héllo".as_bytes());
            }
            other => panic!("unexpected data: {other:?}"),
        }
        assert_eq!(column.value(0), Some(Value::Text("héllo".into())));
        assert_eq!(column.value(1), Some(Value::Null));
        assert_eq!(column.value(2), Some(Value::Text(String::new())));
    }

    #[test]
    fn test_finish_is_terminal() {
        let mut builder = builder_for(&PhysicalType::Utf8, 0);
        builder.append(Value::Text("a".into())).unwrap();
        let column = builder.finish().unwrap();
        assert_eq!(column.len(), 1);

        assert_eq!(builder.append(Value::Text("b".into())), Err(Error::BuilderFinalized));
        assert_eq!(builder.append_null(), Err(Error::BuilderFinalized));
        assert!(matches!(builder.finish(), Err(Error::BuilderFinalized)));
    }

    #[test]
    fn test_empty_builder_finishes() {
        for data_type in [
            PhysicalType::Null,
            PhysicalType::Boolean,
            PhysicalType::Int16,
            PhysicalType::Float64,
            PhysicalType::decimal128(10, 2),
            PhysicalType::Date32,
            PhysicalType::Timestamp(TimeUnit::Second),
            PhysicalType::Binary,
        ] {
            let mut builder = builder_for(&data_type, 0);
            assert!(builder.is_empty());
            let column = builder.finish().unwrap();
            assert!(column.is_empty());
            assert_eq!(column.data_type(), &data_type);
        }
    }
}
