//! colbatch - columnar results for relational query cursors.
//!
//! A [`Session`] runs SQL against any [`QuerySource`] and returns either a
//! columnar batch behind memoized row views or a conventional row result,
//! chosen per call through [`ExecOptions`].
//!
//! # Quick Start
//!
//! ```ignore
//! use colbatch::{ExecOptions, ResultSet, Session};
//!
//! let mut session = Session::new(client);
//! let result = session.execute("SELECT id, name FROM users", &ExecOptions::default())?;
//!
//! for row in result.row_mappings() {
//!     println!("{:?}", row.get("name"));
//! }
//! ```

pub mod config;
pub mod error;
pub mod result;
pub mod session;
pub mod source;

pub use config::ExecOptions;
pub use error::{Error, Result};
pub use result::{QueryResult, ResultSet, RowResult};
pub use session::Session;
pub use source::{QuerySource, RawResult, TextCursor};

pub use colbatch_core::{ColumnMeta, ColumnarResultView, ReadOptions, RowMap, TextDialect, TextRow};

/// Re-export protocol types.
pub use colbatch_proto as proto;
