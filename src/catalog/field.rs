//! Field and catalog structures
//!
//! A `Field` is a named, typed column at a fixed 0-based position in the
//! table's declared column order. Name uniqueness is assumed, not enforced.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column value types eligible for relational exposure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Integer numbers
    Int,
    /// Floating point numbers
    Float,
    /// Plain text
    Text,
    /// RFC 3339 timestamps stored as text
    Date,
}

impl FieldType {
    /// Returns the type name for explain output
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Int => "INT",
            FieldType::Float => "FLOAT",
            FieldType::Text => "TEXT",
            FieldType::Date => "DATE",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single column: name, position in the base table, and type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column name
    pub name: String,
    /// 0-based position in the table's declared column order
    pub index: usize,
    /// Column type
    pub field_type: FieldType,
}

impl Field {
    /// Creates a new field
    pub fn new(name: impl Into<String>, index: usize, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            index,
            field_type,
        }
    }
}

/// Ordered set of fields for one table
///
/// Immutable once built; positions are stable for the table's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldCatalog {
    fields: Vec<Field>,
}

impl FieldCatalog {
    /// Creates a catalog from an ordered field list
    ///
    /// Field indices are assigned from position, overriding whatever the
    /// caller put in them.
    pub fn new(fields: impl IntoIterator<Item = (String, FieldType)>) -> Self {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(i, (name, field_type))| Field::new(name, i, field_type))
            .collect();
        Self { fields }
    }

    /// Creates an empty catalog (a collection with no records)
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the catalog has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field at a position, if valid
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Returns the field with the given name
    pub fn field_named(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns all fields in declared order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Returns all column names in declared order
    pub fn names(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    /// The identity permutation `[0, 1, .., len-1]`
    ///
    /// Used for scans with no projection above them.
    pub fn identity_projection(&self) -> Vec<usize> {
        (0..self.fields.len()).collect()
    }
}
