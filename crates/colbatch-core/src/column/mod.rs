//! Typed, null-aware column buffers.
//!
//! A [`Column`] is produced once by a [`ColumnBuilder`] and never mutated
//! afterwards. Fixed-width types keep one contiguous `Vec` of native values,
//! binary and UTF-8 keep an offsets buffer into one contiguous byte buffer,
//! booleans are bit-packed. Null slots are tracked in a parallel [`Bitmap`]
//! and hold a zero placeholder in the value buffer.

mod bitmap;
pub mod builder;

pub use bitmap::Bitmap;
pub use builder::{builder_for, ColumnBuilder};

use colbatch_proto::{Decimal, PhysicalType, Value};

/// Offsets plus contiguous data for variable-width values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarBuffer {
    offsets: Vec<usize>,
    data: Vec<u8>,
}

impl VarBuffer {
    pub(crate) fn with_capacity(items: usize) -> Self {
        let mut offsets = Vec::with_capacity(items + 1);
        offsets.push(0);
        Self {
            offsets,
            data: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
        self.offsets.push(self.data.len());
    }

    /// Bytes of the value at `index`.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        Some(&self.data[start..end])
    }

    /// Offsets buffer; value `i` spans `offsets[i]..offsets[i + 1]`.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Contiguous value bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Value buffer of a column, one variant per physical family.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// No buffer; every slot is null.
    Null,
    /// Bit-packed booleans.
    Boolean(Bitmap),
    /// 8-bit integers.
    Int8(Vec<i8>),
    /// 16-bit integers.
    Int16(Vec<i16>),
    /// 32-bit integers.
    Int32(Vec<i32>),
    /// 64-bit integers.
    Int64(Vec<i64>),
    /// 8-bit unsigned integers.
    UInt8(Vec<u8>),
    /// 16-bit unsigned integers.
    UInt16(Vec<u16>),
    /// 32-bit unsigned integers.
    UInt32(Vec<u32>),
    /// 64-bit unsigned integers.
    UInt64(Vec<u64>),
    /// 32-bit floats.
    Float32(Vec<f32>),
    /// 64-bit floats.
    Float64(Vec<f64>),
    /// Decimal mantissas at the column's scale.
    Decimal128(Vec<i128>),
    /// Days since the Unix epoch.
    Date32(Vec<i32>),
    /// Epoch offsets at the column's unit.
    Timestamp(Vec<i64>),
    /// Variable-width bytes.
    Binary(VarBuffer),
    /// Variable-width UTF-8, validated on append.
    Utf8(VarBuffer),
}

/// A frozen, typed column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    data_type: PhysicalType,
    data: ColumnData,
    nulls: Bitmap,
}

impl Column {
    pub(crate) fn new(data_type: PhysicalType, data: ColumnData, nulls: Bitmap) -> Self {
        Self {
            data_type,
            data,
            nulls,
        }
    }

    /// Storage type of the column.
    pub fn data_type(&self) -> &PhysicalType {
        &self.data_type
    }

    /// Raw value buffer.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Null bitmap; a set bit marks a null slot.
    pub fn nulls(&self) -> &Bitmap {
        &self.nulls
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.nulls.len()
    }

    /// Check if the column has no slots.
    pub fn is_empty(&self) -> bool {
        self.nulls.is_empty()
    }

    /// Number of null slots.
    pub fn null_count(&self) -> usize {
        self.nulls.count_set()
    }

    /// Check if the slot at `index` is null.
    pub fn is_null(&self, index: usize) -> bool {
        self.nulls.get(index)
    }

    /// Value at `index`, or `None` past the end.
    pub fn value(&self, index: usize) -> Option<Value> {
        if index >= self.len() {
            return None;
        }
        if self.nulls.get(index) {
            return Some(Value::Null);
        }

        let value = match &self.data {
            ColumnData::Null => Value::Null,
            ColumnData::Boolean(bits) => Value::Bool(bits.get(index)),
            ColumnData::Int8(v) => Value::Int(i64::from(v[index])),
            ColumnData::Int16(v) => Value::Int(i64::from(v[index])),
            ColumnData::Int32(v) => Value::Int(i64::from(v[index])),
            ColumnData::Int64(v) => Value::Int(v[index]),
            ColumnData::UInt8(v) => Value::UInt(u64::from(v[index])),
            ColumnData::UInt16(v) => Value::UInt(u64::from(v[index])),
            ColumnData::UInt32(v) => Value::UInt(u64::from(v[index])),
            ColumnData::UInt64(v) => Value::UInt(v[index]),
            ColumnData::Float32(v) => Value::Float(f64::from(v[index])),
            ColumnData::Float64(v) => Value::Float(v[index]),
            ColumnData::Decimal128(v) => {
                let scale = match self.data_type {
                    PhysicalType::Decimal128 { scale, .. } => scale,
                    _ => 0,
                };
                Value::Decimal(Decimal::from_i128(v[index], scale))
            }
            ColumnData::Date32(v) => Value::Date(v[index]),
            ColumnData::Timestamp(v) => match self.data_type {
                PhysicalType::Timestamp(unit) => Value::Timestamp {
                    value: v[index],
                    unit,
                },
                _ => Value::Int(v[index]),
            },
            ColumnData::Binary(buf) => Value::Bytes(buf.get(index)?.to_vec()),
            ColumnData::Utf8(buf) => {
                Value::Text(String::from_utf8_lossy(buf.get(index)?).into_owned())
            }
        };
        Some(value)
    }

    /// Iterate over every slot in order.
    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(move |i| self.value(i).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_var_buffer_offsets() {
        let mut buf = VarBuffer::with_capacity(3);
        buf.push(b"ab");
        buf.push(b"");
        buf.push(b"cde");

        assert_eq!(buf.offsets(), &[0, 2, 2, 5]);
        assert_eq!(buf.data(), b"abcde");
        assert_eq!(buf.get(0), Some(&b"ab"[..]));
        assert_eq!(buf.get(1), Some(&b""[..]));
        assert_eq!(buf.get(2), Some(&b"cde"[..]));
        assert_eq!(buf.get(3), None);
    }

    #[test]
    fn test_column_value_reads_nulls() {
        let mut nulls = Bitmap::new();
        nulls.push(false);
        nulls.push(true);
        let column = Column::new(PhysicalType::Int32, ColumnData::Int32(vec![7, 0]), nulls);

        assert_eq!(column.len(), 2);
        assert_eq!(column.null_count(), 1);
        assert_eq!(column.value(0), Some(Value::Int(7)));
        assert_eq!(column.value(1), Some(Value::Null));
        assert_eq!(column.value(2), None);
        assert_eq!(column.iter().collect::<Vec<_>>(), vec![Value::Int(7), Value::Null]);
    }
}
