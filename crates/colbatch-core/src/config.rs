//! Read configuration.

/// Text encoding conventions of the source protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDialect {
    /// MySQL text protocol: binary columns arrive as raw bytes.
    #[default]
    MySql,
    /// PostgreSQL text format: `bytea` arrives hex-encoded with a `\x` prefix.
    Postgres,
}

/// Configuration for turning a query result into a batch.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Materialize declared types. When false every column is read as text.
    pub cast: bool,

    /// Read `TINYINT(1)` columns as booleans.
    pub cast_booleans: bool,

    /// Text conventions used when decoding text-protocol fields.
    pub dialect: TextDialect,

    /// Expected number of rows, used to pre-size column buffers.
    pub capacity_hint: Option<usize>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            cast: true,
            cast_booleans: false,
            dialect: TextDialect::MySql,
            capacity_hint: None,
        }
    }
}

impl ReadOptions {
    /// Create options for the given dialect.
    pub fn new(dialect: TextDialect) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    /// Set whether declared types are materialized.
    pub fn with_cast(mut self, cast: bool) -> Self {
        self.cast = cast;
        self
    }

    /// Set whether `TINYINT(1)` columns become booleans.
    pub fn with_cast_booleans(mut self, cast_booleans: bool) -> Self {
        self.cast_booleans = cast_booleans;
        self
    }

    /// Set the text dialect.
    pub fn with_dialect(mut self, dialect: TextDialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the expected row count.
    pub fn with_capacity_hint(mut self, rows: usize) -> Self {
        self.capacity_hint = Some(rows);
        self
    }
}
