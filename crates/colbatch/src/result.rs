//! Query results.
//!
//! A query returns either a [`ColumnarResultView`] over a materialized batch
//! or a [`RowResult`] holding decoded rows. Both answer the same
//! [`ResultSet`] questions with identical values.

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use colbatch_core::{CastPlan, ColumnarResultView, RowMap, Schema};
use colbatch_proto::{LogicalType, Row};

use crate::error::Result;

/// Row-oriented access shared by every result kind.
pub trait ResultSet {
    /// Column names in order.
    fn columns(&self) -> &[String];

    /// Every row as a value tuple.
    fn rows(&self) -> &[Row];

    /// Every row keyed by column name. Later duplicate names win.
    fn row_mappings(&self) -> &[RowMap];

    /// First row as a mapping.
    fn first(&self) -> Option<RowMap>;

    /// Last row as a mapping.
    fn last(&self) -> Option<RowMap>;

    /// Rows with selected columns converted to requested logical types.
    fn cast_values(&self, requested: &HashMap<String, LogicalType>) -> Result<Cow<'_, [Row]>>;

    /// Number of rows.
    fn len(&self) -> usize {
        self.rows().len()
    }

    /// Check if there are no rows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultSet for ColumnarResultView {
    fn columns(&self) -> &[String] {
        ColumnarResultView::columns(self)
    }

    fn rows(&self) -> &[Row] {
        ColumnarResultView::rows(self)
    }

    fn row_mappings(&self) -> &[RowMap] {
        self.to_row_mappings()
    }

    fn first(&self) -> Option<RowMap> {
        ColumnarResultView::first(self)
    }

    fn last(&self) -> Option<RowMap> {
        ColumnarResultView::last(self)
    }

    fn cast_values(&self, requested: &HashMap<String, LogicalType>) -> Result<Cow<'_, [Row]>> {
        Ok(ColumnarResultView::cast_values(self, requested)?)
    }

    fn len(&self) -> usize {
        ColumnarResultView::len(self)
    }
}

/// A conventional result: rows decoded straight from the cursor.
#[derive(Debug)]
pub struct RowResult {
    schema: Arc<Schema>,
    columns: Vec<String>,
    rows: Vec<Row>,
    mappings: OnceLock<Vec<RowMap>>,
}

impl RowResult {
    /// Create a row result. Every row must match the schema's width.
    pub fn new(schema: Arc<Schema>, rows: Vec<Row>) -> Self {
        let columns = schema.fields().iter().map(|f| f.name.clone()).collect();
        Self {
            schema,
            columns,
            rows,
            mappings: OnceLock::new(),
        }
    }

    /// Schema the rows were decoded against.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Take the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    fn zip_names(&self, row: &Row) -> RowMap {
        self.columns
            .iter()
            .map(|name| Arc::from(name.as_str()))
            .zip(row.iter().cloned())
            .collect()
    }
}

impl ResultSet for RowResult {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> &[Row] {
        &self.rows
    }

    fn row_mappings(&self) -> &[RowMap] {
        self.mappings.get_or_init(|| {
            let keys: Vec<Arc<str>> = self.columns.iter().map(|n| Arc::from(n.as_str())).collect();
            self.rows
                .iter()
                .map(|row| keys.iter().cloned().zip(row.iter().cloned()).collect())
                .collect()
        })
    }

    fn first(&self) -> Option<RowMap> {
        self.rows.first().map(|row| self.zip_names(row))
    }

    fn last(&self) -> Option<RowMap> {
        self.rows.last().map(|row| self.zip_names(row))
    }

    fn cast_values(&self, requested: &HashMap<String, LogicalType>) -> Result<Cow<'_, [Row]>> {
        let plan = CastPlan::new(&self.schema, requested)?;
        if plan.is_identity() {
            return Ok(Cow::Borrowed(&self.rows));
        }
        let rows = self
            .rows
            .iter()
            .map(|row| plan.cast_row(row))
            .collect::<colbatch_core::Result<Vec<_>>>()?;
        Ok(Cow::Owned(rows))
    }
}

/// Result of [`Session::execute`](crate::Session::execute).
#[derive(Debug)]
pub enum QueryResult {
    /// A columnar batch behind memoized row views.
    Columnar(ColumnarResultView),
    /// Rows decoded without building columns.
    Rows(RowResult),
}

impl QueryResult {
    /// Check if the result is columnar.
    pub fn is_columnar(&self) -> bool {
        matches!(self, QueryResult::Columnar(_))
    }

    /// The columnar view, if the result is columnar.
    pub fn as_columnar(&self) -> Option<&ColumnarResultView> {
        match self {
            QueryResult::Columnar(view) => Some(view),
            QueryResult::Rows(_) => None,
        }
    }

    fn inner(&self) -> &dyn ResultSet {
        match self {
            QueryResult::Columnar(view) => view,
            QueryResult::Rows(rows) => rows,
        }
    }
}

impl ResultSet for QueryResult {
    fn columns(&self) -> &[String] {
        self.inner().columns()
    }

    fn rows(&self) -> &[Row] {
        self.inner().rows()
    }

    fn row_mappings(&self) -> &[RowMap] {
        self.inner().row_mappings()
    }

    fn first(&self) -> Option<RowMap> {
        self.inner().first()
    }

    fn last(&self) -> Option<RowMap> {
        self.inner().last()
    }

    fn cast_values(&self, requested: &HashMap<String, LogicalType>) -> Result<Cow<'_, [Row]>> {
        self.inner().cast_values(requested)
    }

    fn len(&self) -> usize {
        self.inner().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colbatch_proto::{PhysicalType, Value};

    fn rows() -> RowResult {
        let schema = Arc::new(
            Schema::default()
                .with_field("id", PhysicalType::Int64)
                .with_field("score", PhysicalType::Float64),
        );
        RowResult::new(
            schema,
            vec![
                vec![Value::Int(1), Value::Float(1.5)],
                vec![Value::Int(2), Value::Null],
            ],
        )
    }

    #[test]
    fn test_row_result_access() {
        let result = rows();
        assert_eq!(result.columns(), &["id".to_string(), "score".to_string()]);
        assert_eq!(result.len(), 2);
        assert_eq!(result.first().unwrap().get("score"), Some(&Value::Float(1.5)));
        assert_eq!(result.last().unwrap().get("id"), Some(&Value::Int(2)));
        assert_eq!(result.row_mappings()[1].get("score"), Some(&Value::Null));
    }

    #[test]
    fn test_row_result_cast() {
        let result = rows();
        let casted = result.cast_values(&HashMap::new()).unwrap();
        assert!(matches!(casted, Cow::Borrowed(_)));

        let mut requested = HashMap::new();
        requested.insert("score".to_string(), LogicalType::Text);
        let casted = result.cast_values(&requested).unwrap();
        assert_eq!(casted[0], vec![Value::Int(1), Value::Text("1.5".into())]);
        assert_eq!(casted[1], vec![Value::Int(2), Value::Null]);
    }
}
