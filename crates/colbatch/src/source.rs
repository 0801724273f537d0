//! The boundary to a database client.

use colbatch_core::{ColumnMeta, TextRow};

use crate::error::Result;

/// Forward-only cursor over text-protocol rows.
///
/// A failure while fetching is reported as
/// [`colbatch_core::Error::Cursor`].
pub type TextCursor = Box<dyn Iterator<Item = colbatch_core::Result<TextRow>> + Send>;

/// A result as the client delivers it: a header plus a row cursor.
pub struct RawResult {
    /// Declared columns in order.
    pub columns: Vec<ColumnMeta>,
    /// Rows in the text protocol form.
    pub rows: TextCursor,
}

impl RawResult {
    /// Create a raw result.
    pub fn new(columns: Vec<ColumnMeta>, rows: TextCursor) -> Self {
        Self { columns, rows }
    }
}

impl std::fmt::Debug for RawResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResult")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// Something that runs SQL and returns raw results.
pub trait QuerySource {
    /// Run a statement.
    fn query(&mut self, sql: &str) -> Result<RawResult>;
}

impl<S: QuerySource + ?Sized> QuerySource for &mut S {
    fn query(&mut self, sql: &str) -> Result<RawResult> {
        (**self).query(sql)
    }
}

impl<S: QuerySource + ?Sized> QuerySource for Box<S> {
    fn query(&mut self, sql: &str) -> Result<RawResult> {
        (**self).query(sql)
    }
}
