//! Schema inference from a result header.

use colbatch_proto::{LogicalType, PhysicalType};
use tracing::trace;

use super::mapper::physical_type_for;
use super::{ColumnMeta, Field, Schema};
use crate::config::ReadOptions;
use crate::error::{Error, Result};

/// Build the schema for a result header, preserving column order.
///
/// Any column without a physical mapping fails the whole inference, so no
/// row is read for a result that could not be stored.
pub fn infer_schema(columns: &[ColumnMeta], options: &ReadOptions) -> Result<Schema> {
    let mut fields = Vec::with_capacity(columns.len());

    for column in columns {
        let data_type = resolve(column, options).map_err(|err| match err {
            Error::UnsupportedType(detail) => {
                Error::UnsupportedType(format!("column '{}': {}", column.name, detail))
            }
            other => other,
        })?;
        trace!(column = %column.name, logical = %column.logical_type, physical = %data_type, "Resolved column type");
        fields.push(Field::new(column.name.clone(), data_type));
    }

    Ok(Schema::new(fields))
}

fn resolve(column: &ColumnMeta, options: &ReadOptions) -> Result<PhysicalType> {
    if !options.cast {
        return Ok(match column.logical_type {
            LogicalType::Null => PhysicalType::Null,
            _ => PhysicalType::Utf8,
        });
    }

    if options.cast_booleans
        && column.logical_type == LogicalType::TinyInteger
        && column.display_width == Some(1)
    {
        return Ok(PhysicalType::Boolean);
    }

    let physical = physical_type_for(&column.logical_type)?;
    if column.unsigned {
        if let Some(unsigned) = physical.to_unsigned() {
            return Ok(unsigned);
        }
    }
    Ok(physical)
}
