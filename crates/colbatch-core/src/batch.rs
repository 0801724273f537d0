//! Immutable columnar batches.

use std::sync::Arc;

use colbatch_proto::{Row, Value};

use crate::column::Column;
use crate::schema::Schema;

/// A materialized result: a schema plus one frozen column per field.
///
/// Every column has exactly `num_rows` slots. A batch is never mutated after
/// [`materialize`](crate::materialize::materialize) returns it and is shared
/// between views through an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    schema: Arc<Schema>,
    columns: Vec<Column>,
    num_rows: usize,
}

impl Batch {
    pub(crate) fn new(schema: Arc<Schema>, columns: Vec<Column>, num_rows: usize) -> Self {
        debug_assert_eq!(schema.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == num_rows));
        Self {
            schema,
            columns,
            num_rows,
        }
    }

    /// Schema of the batch.
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Columns in schema order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column at `index`.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Column with the given name (first match).
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.schema.index_of(name).and_then(|i| self.columns.get(i))
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Check if the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Value at `(row, column)`.
    pub fn value(&self, row: usize, column: usize) -> Option<Value> {
        self.columns.get(column)?.value(row)
    }

    /// Row at `index`, assembled from every column.
    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.num_rows {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|c| c.value(index).unwrap_or(Value::Null))
                .collect(),
        )
    }
}
