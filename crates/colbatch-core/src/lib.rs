//! colbatch core: row to column materialization.
//!
//! This crate turns row-oriented query results into typed, contiguous
//! columnar batches and exposes those batches back to row-oriented callers.
//!
//! # Modules
//!
//! - [`schema`] - Logical to physical type mapping and schema inference
//! - [`column`] - Typed column buffers and their builders
//! - [`materialize`] - Draining a row cursor into a [`Batch`]
//! - [`text`] - Decoding text-protocol fields
//! - [`cast`] - Converting values between physical types
//! - [`view`] - Memoized row views over a batch

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod batch;
pub mod cast;
pub mod column;
pub mod config;
pub mod error;
pub mod materialize;
pub mod schema;
pub mod text;
pub mod view;

pub use batch::Batch;
pub use cast::{can_cast, cast_value, CastPlan};
pub use column::{builder_for, Bitmap, Column, ColumnBuilder, ColumnData, VarBuffer};
pub use config::{ReadOptions, TextDialect};
pub use error::{Error, Result};
pub use materialize::{materialize, materialize_with_capacity, read_result, read_text_result};
pub use schema::{infer_schema, is_compatible, physical_type_for, ColumnMeta, Field, Schema};
pub use text::{FieldDecoder, TextRow, TextRows};
pub use view::{ColumnarResultView, RowMap, ViewStats};

/// Re-export protocol types.
pub use colbatch_proto as proto;
