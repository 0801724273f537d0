//! Execution options.

use colbatch_core::ReadOptions;

/// Per-call options for [`Session::execute`](crate::Session::execute).
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// Return a columnar result. When false, rows are decoded directly into
    /// a conventional row result.
    pub columnar: bool,

    /// How result fields are read.
    pub read: ReadOptions,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            columnar: true,
            read: ReadOptions::default(),
        }
    }
}

impl ExecOptions {
    /// Options for a conventional row result.
    pub fn rows() -> Self {
        Self::default().with_columnar(false)
    }

    /// Set whether the result is columnar.
    pub fn with_columnar(mut self, columnar: bool) -> Self {
        self.columnar = columnar;
        self
    }

    /// Set the read options.
    pub fn with_read_options(mut self, read: ReadOptions) -> Self {
        self.read = read;
        self
    }
}
