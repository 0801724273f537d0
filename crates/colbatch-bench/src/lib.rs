//! colbatch Benchmark Suite
//!
//! Criterion benchmarks for the materialization hot path.
//!
//! # Benchmark Categories
//!
//! - **Materialize**: Value rows and text-protocol rows into a batch
//! - **View**: Building row matrices and row mappings, casting values
//! - **Serialization**: rkyv vs JSON for row values

pub mod fixtures;

pub use fixtures::{generate_orders, generate_text_orders, order_columns, Scale};
