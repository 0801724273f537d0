//! Logical to physical type mapping.
//!
//! The mapping is a closed table over [`LogicalType`]: adding a variant
//! without a row here is a compile error.

use colbatch_proto::{LogicalType, PhysicalType, TimeUnit, MAX_DECIMAL_PRECISION};

use crate::error::{Error, Result};

/// Physical type that stores a logical type.
///
/// Fails with [`Error::UnsupportedType`] for families colbatch does not
/// store (`Enum`, `Set`, `Geometry`) and for decimals outside decimal128.
pub fn physical_type_for(logical: &LogicalType) -> Result<PhysicalType> {
    let physical = match logical {
        LogicalType::TinyInteger => PhysicalType::Int8,
        LogicalType::SmallInteger => PhysicalType::Int16,
        LogicalType::Integer => PhysicalType::Int32,
        LogicalType::BigInteger => PhysicalType::Int64,
        LogicalType::Real => PhysicalType::Float32,
        LogicalType::Float => PhysicalType::Float64,
        LogicalType::Decimal { precision, scale } => {
            if *precision == 0 || *precision > MAX_DECIMAL_PRECISION || scale > precision {
                return Err(Error::unsupported_logical(logical));
            }
            PhysicalType::Decimal128 {
                precision: *precision,
                scale: *scale,
            }
        }
        LogicalType::Boolean => PhysicalType::Boolean,
        LogicalType::Date => PhysicalType::Date32,
        // Times are stored as microseconds past 2000-01-01T00:00:00.
        LogicalType::DateTime | LogicalType::Time => PhysicalType::Timestamp(TimeUnit::Microsecond),
        LogicalType::Text | LogicalType::String => PhysicalType::Utf8,
        LogicalType::Binary => PhysicalType::Binary,
        LogicalType::Null => PhysicalType::Null,
        LogicalType::Enum | LogicalType::Set | LogicalType::Geometry => {
            return Err(Error::unsupported_logical(logical));
        }
    };
    Ok(physical)
}

/// Whether values stored as `physical` already are the representation
/// `logical` asks for.
///
/// Parameters count: `timestamp[ms]` is not compatible with `DateTime`, and
/// `decimal128(10, 2)` is not compatible with `decimal(10, 3)`.
pub fn is_compatible(logical: &LogicalType, physical: &PhysicalType) -> bool {
    match physical_type_for(logical) {
        Ok(mapped) => mapped == *physical,
        Err(_) => false,
    }
}
