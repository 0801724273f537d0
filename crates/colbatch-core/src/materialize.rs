//! Row to column materialization.

use std::sync::Arc;
use std::time::Instant;

use colbatch_proto::Row;
use tracing::{debug, instrument};

use crate::batch::Batch;
use crate::column::{builder_for, ColumnBuilder};
use crate::config::ReadOptions;
use crate::error::{Error, Result};
use crate::schema::{infer_schema, ColumnMeta, Schema};
use crate::text::{TextRow, TextRows};

/// Drain a row cursor into a batch for `schema`.
///
/// Field `i` of every row goes to column `i`. The cursor is consumed; a
/// cursor error, a row of the wrong width, or a value its column rejects
/// aborts the whole batch.
pub fn materialize<I>(schema: Arc<Schema>, rows: I) -> Result<Batch>
where
    I: IntoIterator<Item = Result<Row>>,
{
    materialize_with_capacity(schema, rows, 0)
}

/// [`materialize`] with column buffers pre-sized for `capacity` rows.
#[instrument(skip_all, fields(columns = schema.len()))]
pub fn materialize_with_capacity<I>(schema: Arc<Schema>, rows: I, capacity: usize) -> Result<Batch>
where
    I: IntoIterator<Item = Result<Row>>,
{
    let start = Instant::now();
    let width = schema.len();
    let mut builders: Vec<Box<dyn ColumnBuilder>> = schema
        .fields()
        .iter()
        .map(|f| builder_for(&f.data_type, capacity))
        .collect();

    let mut num_rows = 0usize;
    for row in rows {
        let row = row?;
        if row.len() != width {
            return Err(Error::RowShapeMismatch {
                row: num_rows,
                expected: width,
                actual: row.len(),
            });
        }
        for (builder, value) in builders.iter_mut().zip(row) {
            builder.append(value)?;
        }
        num_rows += 1;
    }

    let columns = builders
        .iter_mut()
        .map(|b| b.finish())
        .collect::<Result<Vec<_>>>()?;

    debug!(
        rows = num_rows,
        columns = width,
        duration_us = start.elapsed().as_micros() as u64,
        "Materialized batch"
    );

    Ok(Batch::new(schema, columns, num_rows))
}

/// Infer the schema for a result header and materialize its rows.
///
/// Inference runs first, so an unsupported column fails before any row is
/// pulled from the cursor.
pub fn read_result<I>(columns: &[ColumnMeta], rows: I, options: &ReadOptions) -> Result<Batch>
where
    I: IntoIterator<Item = Result<Row>>,
{
    let schema = Arc::new(infer_schema(columns, options)?);
    materialize_with_capacity(schema, rows, options.capacity_hint.unwrap_or(0))
}

/// [`read_result`] for a text-protocol cursor.
pub fn read_text_result<I>(columns: &[ColumnMeta], rows: I, options: &ReadOptions) -> Result<Batch>
where
    I: IntoIterator<Item = Result<TextRow>>,
{
    let schema = Arc::new(infer_schema(columns, options)?);
    let decoded = TextRows::new(rows.into_iter(), &schema, options.dialect);
    materialize_with_capacity(schema, decoded, options.capacity_hint.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colbatch_proto::{LogicalType, PhysicalType, Value};

    fn schema() -> Arc<Schema> {
        Arc::new(
            Schema::default()
                .with_field("id", PhysicalType::Int32)
                .with_field("name", PhysicalType::Utf8),
        )
    }

    #[test]
    fn test_materialize_columns() {
        let rows = vec![
            Ok(vec![Value::Int(1), Value::Text("a".into())]),
            Ok(vec![Value::Int(2), Value::Null]),
        ];
        let batch = materialize(schema(), rows).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.column(0).unwrap().null_count(), 0);
        assert_eq!(batch.column(1).unwrap().null_count(), 1);
        assert_eq!(batch.row(0), Some(vec![Value::Int(1), Value::Text("a".into())]));
    }

    #[test]
    fn test_empty_cursor() {
        let batch = materialize(schema(), Vec::new()).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch.num_columns(), 2);
        assert!(batch.columns().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_row_shape_mismatch() {
        let rows = vec![
            Ok(vec![Value::Int(1), Value::Text("a".into())]),
            Ok(vec![Value::Int(2)]),
        ];
        let err = materialize(schema(), rows).unwrap_err();
        assert_eq!(
            err,
            Error::RowShapeMismatch {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_row_with_extra_fields() {
        let schema = Arc::new(Schema::default().with_field("id", PhysicalType::Int32));
        let rows = vec![Ok(vec![Value::Int(1), Value::Int(2)])];
        let err = materialize(schema, rows).unwrap_err();
        assert_eq!(
            err,
            Error::RowShapeMismatch {
                row: 0,
                expected: 1,
                actual: 2
            }
        );
    }

    #[test]
    fn test_cursor_error_aborts() {
        let rows = vec![
            Ok(vec![Value::Int(1), Value::Text("a".into())]),
            Err(Error::Cursor("connection reset".into())),
        ];
        let err = materialize(schema(), rows).unwrap_err();
        assert_eq!(err, Error::Cursor("connection reset".into()));
    }

    #[test]
    fn test_value_error_aborts() {
        let rows = vec![Ok(vec![Value::Text("1".into()), Value::Text("a".into())])];
        let err = materialize(schema(), rows).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_read_result_fails_before_reading() {
        let columns = vec![ColumnMeta::new("tags", LogicalType::Set)];
        let rows = std::iter::from_fn(|| -> Option<Result<Row>> {
            panic!("rows must not be read for an unsupported header")
        });
        let err = read_result(&columns, rows, &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_read_text_result() {
        let columns = vec![
            ColumnMeta::new("id", LogicalType::BigInteger),
            ColumnMeta::new("born", LogicalType::Date),
        ];
        let rows: Vec<Result<TextRow>> = vec![
            Ok(vec![Some(b"1".to_vec()), Some(b"2024-01-01".to_vec())]),
            Ok(vec![Some(b"2".to_vec()), Some(b"0000-00-00".to_vec())]),
        ];
        let options = ReadOptions::default().with_capacity_hint(2);
        let batch = read_text_result(&columns, rows, &options).unwrap();

        assert_eq!(batch.schema().field(1).map(|f| &f.data_type), Some(&PhysicalType::Date32));
        assert_eq!(batch.row(0), Some(vec![Value::Int(1), Value::Date(19723)]));
        assert_eq!(batch.row(1), Some(vec![Value::Int(2), Value::Null]));
    }

    #[test]
    fn test_read_text_result_unsigned() {
        let columns = vec![
            ColumnMeta::new("views", LogicalType::Integer).with_unsigned(true),
            ColumnMeta::new("bytes", LogicalType::BigInteger).with_unsigned(true),
        ];
        let rows: Vec<Result<TextRow>> = vec![Ok(vec![
            Some(b"3000000000".to_vec()),
            Some(b"18446744073709551615".to_vec()),
        ])];
        let batch = read_text_result(&columns, rows, &ReadOptions::default()).unwrap();

        assert_eq!(batch.schema().field(0).map(|f| &f.data_type), Some(&PhysicalType::UInt32));
        assert_eq!(
            batch.row(0),
            Some(vec![Value::UInt(3_000_000_000), Value::UInt(u64::MAX)])
        );
    }

    #[test]
    fn test_read_text_result_oversized_time() {
        let columns = vec![ColumnMeta::new("t", LogicalType::Time)];
        let rows: Vec<Result<TextRow>> =
            vec![Ok(vec![Some(b"100000000000000000000000000000000:00:00".to_vec())])];
        let err = read_text_result(&columns, rows, &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }
}
