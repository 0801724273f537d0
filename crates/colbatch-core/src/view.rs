//! Row-oriented access to a columnar batch.
//!
//! [`ColumnarResultView`] wraps a shared [`Batch`] and derives the shapes
//! row-oriented callers expect: column names, a row-major value matrix, and
//! one name-keyed mapping per row. Each derived structure is built on first
//! access and cached for the lifetime of the view.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use colbatch_proto::{LogicalType, PhysicalType, Row, Value};
use tracing::{trace, warn};

use crate::batch::Batch;
use crate::cast::{cast_value, CastPlan};
use crate::column::Column;
use crate::error::Result;
use crate::schema::Schema;

/// One row keyed by column name. Keys are shared across all rows.
pub type RowMap = HashMap<Arc<str>, Value>;

/// How many times each cached structure of a view has been built.
///
/// Each counter is at most 1 for the lifetime of a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewStats {
    /// Column name list builds.
    pub column_builds: u64,
    /// Row matrix builds.
    pub row_builds: u64,
    /// Row mapping builds.
    pub mapping_builds: u64,
}

#[derive(Debug, Default)]
struct BuildCounters {
    columns: AtomicU64,
    rows: AtomicU64,
    mappings: AtomicU64,
}

/// Lazily memoized row views over a batch.
#[derive(Debug)]
pub struct ColumnarResultView {
    batch: Arc<Batch>,
    columns: OnceLock<Vec<String>>,
    rows: OnceLock<Vec<Row>>,
    mappings: OnceLock<Vec<RowMap>>,
    counters: BuildCounters,
}

impl ColumnarResultView {
    /// Create a view over a shared batch.
    pub fn new(batch: Arc<Batch>) -> Self {
        Self {
            batch,
            columns: OnceLock::new(),
            rows: OnceLock::new(),
            mappings: OnceLock::new(),
            counters: BuildCounters::default(),
        }
    }

    /// Underlying batch.
    pub fn batch(&self) -> &Arc<Batch> {
        &self.batch
    }

    /// Schema of the underlying batch.
    pub fn schema(&self) -> &Schema {
        self.batch.schema()
    }

    /// Column names and storage types in order.
    pub fn column_types(&self) -> Vec<(&str, &PhysicalType)> {
        self.schema()
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), &f.data_type))
            .collect()
    }

    /// Column names in schema order.
    pub fn columns(&self) -> &[String] {
        self.columns.get_or_init(|| {
            self.counters.columns.fetch_add(1, Ordering::Relaxed);
            trace!(columns = self.batch.num_columns(), "Building column names");
            self.schema().fields().iter().map(|f| f.name.clone()).collect()
        })
    }

    /// Every row as a value tuple in column order.
    pub fn rows(&self) -> &[Row] {
        self.rows.get_or_init(|| {
            self.counters.rows.fetch_add(1, Ordering::Relaxed);
            trace!(rows = self.batch.num_rows(), "Building row matrix");
            (0..self.batch.num_rows())
                .filter_map(|index| self.batch.row(index))
                .collect()
        })
    }

    /// Every row as a name-keyed mapping.
    ///
    /// When several columns share a name, the last one wins.
    pub fn to_row_mappings(&self) -> &[RowMap] {
        self.mappings.get_or_init(|| {
            self.counters.mappings.fetch_add(1, Ordering::Relaxed);
            trace!(rows = self.batch.num_rows(), "Building row mappings");

            let duplicates = self.schema().duplicate_names();
            if !duplicates.is_empty() {
                warn!(columns = ?duplicates, "Duplicate column names collapse in row mappings");
            }

            let keys: Vec<Arc<str>> = self.columns().iter().map(|name| Arc::from(name.as_str())).collect();
            self.rows()
                .iter()
                .map(|row| keys.iter().cloned().zip(row.iter().cloned()).collect())
                .collect()
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    /// Check if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// First row as a mapping.
    pub fn first(&self) -> Option<RowMap> {
        self.rows().first().map(|row| self.zip_names(row))
    }

    /// Last row as a mapping.
    pub fn last(&self) -> Option<RowMap> {
        self.rows().last().map(|row| self.zip_names(row))
    }

    /// Row mapping at `index`.
    pub fn get(&self, index: usize) -> Option<&RowMap> {
        self.to_row_mappings().get(index)
    }

    /// Iterate over row mappings.
    pub fn iter(&self) -> std::slice::Iter<'_, RowMap> {
        self.to_row_mappings().iter()
    }

    /// Build counters for the cached structures.
    pub fn stats(&self) -> ViewStats {
        ViewStats {
            column_builds: self.counters.columns.load(Ordering::Relaxed),
            row_builds: self.counters.rows.load(Ordering::Relaxed),
            mapping_builds: self.counters.mappings.load(Ordering::Relaxed),
        }
    }

    /// Rows with selected columns converted to requested logical types.
    ///
    /// Columns absent from `requested` keep their own type. When every
    /// column's stored type already is the requested representation, the
    /// cached [`rows`](Self::rows) are returned as-is. Otherwise each
    /// mismatched column is cast element-wise to the physical type of its
    /// requested logical type. Every cast is checked before any value is
    /// converted.
    pub fn cast_values(&self, requested: &HashMap<String, LogicalType>) -> Result<Cow<'_, [Row]>> {
        let plan = CastPlan::new(self.schema(), requested)?;
        if plan.is_identity() {
            return Ok(Cow::Borrowed(self.rows()));
        }

        let columns = self.batch.columns();
        if let ([column], Some(target)) = (columns, plan.target(0)) {
            return Ok(Cow::Owned(cast_single_column(column, target)?));
        }

        let rows = (0..self.len())
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| {
                        let value = column.value(row).unwrap_or(Value::Null);
                        match plan.target(index) {
                            Some(to) => cast_value(&value, column.data_type(), to),
                            None => Ok(value),
                        }
                    })
                    .collect::<Result<Row>>()
            })
            .collect::<Result<Vec<Row>>>()?;

        Ok(Cow::Owned(rows))
    }

    fn zip_names(&self, row: &Row) -> RowMap {
        self.columns()
            .iter()
            .map(|name| Arc::from(name.as_str()))
            .zip(row.iter().cloned())
            .collect()
    }
}

impl From<Batch> for ColumnarResultView {
    fn from(batch: Batch) -> Self {
        Self::new(Arc::new(batch))
    }
}

impl<'a> IntoIterator for &'a ColumnarResultView {
    type Item = &'a RowMap;
    type IntoIter = std::slice::Iter<'a, RowMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn cast_single_column(column: &Column, target: &PhysicalType) -> Result<Vec<Row>> {
    column
        .iter()
        .map(|v| cast_value(&v, column.data_type(), target).map(|c| vec![c]))
        .collect()
}
