//! Result schemas and type resolution.
//!
//! A source protocol declares each result column as a name plus a
//! [`LogicalType`]. [`mapper`] decides which [`PhysicalType`] stores that
//! logical type, and [`inference`] turns a whole result header into the
//! ordered [`Schema`] a batch is built against.

pub mod inference;
pub mod mapper;

pub use inference::infer_schema;
pub use mapper::{is_compatible, physical_type_for};

use std::collections::HashSet;

use colbatch_proto::{LogicalType, PhysicalType};

/// A column as declared in a result header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub logical_type: LogicalType,
    /// Declared display width, e.g. the `1` in `TINYINT(1)`.
    pub display_width: Option<u32>,
    /// Integer column declared `UNSIGNED`.
    pub unsigned: bool,
}

impl ColumnMeta {
    /// Create column metadata.
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            display_width: None,
            unsigned: false,
        }
    }

    /// Set the declared display width.
    pub fn with_display_width(mut self, width: u32) -> Self {
        self.display_width = Some(width);
        self
    }

    /// Set whether the column is declared `UNSIGNED`.
    pub fn with_unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = unsigned;
        self
    }
}

/// One column of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Storage type.
    pub data_type: PhysicalType,
}

impl Field {
    /// Create a field.
    pub fn new(name: impl Into<String>, data_type: PhysicalType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered column layout of a batch.
///
/// Column order is the order of every row tuple. Names are not required to
/// be unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Add a field to the schema.
    pub fn with_field(mut self, name: impl Into<String>, data_type: PhysicalType) -> Self {
        self.fields.push(Field::new(name, data_type));
        self
    }

    /// All fields in column order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Field at a column index.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Index of the first column with the given name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Names that appear more than once, in first-seen order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for field in &self.fields {
            let name = field.name.as_str();
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }
        duplicates
    }
}
