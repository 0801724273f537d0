//! Query execution.

use std::sync::Arc;
use std::time::Instant;

use colbatch_core::{infer_schema, read_text_result, ColumnarResultView, TextRows};
use colbatch_proto::Row;
use tracing::{debug, instrument};

use crate::config::ExecOptions;
use crate::error::Result;
use crate::result::{QueryResult, RowResult};
use crate::source::QuerySource;

/// Runs statements against a [`QuerySource`] and shapes their results.
#[derive(Debug)]
pub struct Session<S> {
    source: S,
}

impl<S: QuerySource> Session<S> {
    /// Create a session over a source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the underlying source.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Consume the session and return the source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Run `sql` and drain its cursor into the result kind `options` selects.
    #[instrument(skip(self, options), fields(columnar = options.columnar))]
    pub fn execute(&mut self, sql: &str, options: &ExecOptions) -> Result<QueryResult> {
        let start = Instant::now();
        let raw = self.source.query(sql)?;

        let result = if options.columnar {
            let batch = read_text_result(&raw.columns, raw.rows, &options.read)?;
            QueryResult::Columnar(ColumnarResultView::new(Arc::new(batch)))
        } else {
            let schema = Arc::new(infer_schema(&raw.columns, &options.read)?);
            let rows = TextRows::new(raw.rows, &schema, options.read.dialect)
                .collect::<colbatch_core::Result<Vec<Row>>>()?;
            QueryResult::Rows(RowResult::new(schema, rows))
        };

        debug!(
            rows = crate::ResultSet::len(&result),
            duration_us = start.elapsed().as_micros() as u64,
            "Query executed"
        );
        Ok(result)
    }
}
