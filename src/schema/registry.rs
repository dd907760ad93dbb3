//! Named tables over in-memory record collections
//!
//! A table's catalog is derived from its first record when the table is
//! registered and is immutable afterwards.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::catalog::{inspect_record, FieldCatalog};
use crate::observability::Logger;
use crate::pushdown::CatalogProvider;
use crate::rows::{materialize_row, CompiledPredicate, Row, RowSource};

/// Schema-level errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A plan referenced a table the schema does not contain
    #[error("unknown table: {0}")]
    UnknownTable(String),
}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// One table: a record collection plus its derived catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    records: Vec<Value>,
    catalog: FieldCatalog,
    pushdown: bool,
}

impl Table {
    fn new(name: impl Into<String>, records: Vec<Value>, pushdown: bool) -> Self {
        let catalog = records
            .first()
            .map(inspect_record)
            .unwrap_or_else(FieldCatalog::empty);
        Self {
            name: name.into(),
            records,
            catalog,
            pushdown,
        }
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The table's catalog
    pub fn catalog(&self) -> &FieldCatalog {
        &self.catalog
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether this table participates in pushdown
    pub fn is_pushdown(&self) -> bool {
        self.pushdown
    }
}

impl RowSource for Table {
    /// Materializes rows for a projection, applying the advisory predicate
    ///
    /// A predicate that does not parse is logged and ignored; the rows
    /// come back unfiltered rather than failing the fetch.
    fn fetch(&self, projection: &[usize], predicate: Option<&str>) -> Vec<Row> {
        let compiled = predicate.and_then(|text| {
            let parsed = CompiledPredicate::parse(text, &self.catalog);
            if parsed.is_none() {
                Logger::warn(
                    "PREDICATE_IGNORED",
                    &[("predicate", text), ("table", &self.name)],
                );
            }
            parsed
        });

        self.records
            .iter()
            .filter(|record| compiled.as_ref().map_or(true, |p| p.matches(record)))
            .map(|record| materialize_row(record, &self.catalog, projection))
            .collect()
    }
}

/// A named set of tables
#[derive(Debug, Clone, Default)]
pub struct Schema {
    name: String,
    tables: HashMap<String, Table>,
}

impl Schema {
    /// Creates an empty schema
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: HashMap::new(),
        }
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registers a plain table (no pushdown; overwrites an existing name)
    pub fn add_table(&mut self, name: impl Into<String>, records: Vec<Value>) {
        let name = name.into();
        Logger::info("TABLE_ADDED", &[("schema", &self.name), ("table", &name)]);
        self.tables
            .insert(name.clone(), Table::new(name, records, false));
    }

    /// Registers a pushdown-enabled table (overwrites an existing name)
    pub fn add_pushdown_table(&mut self, name: impl Into<String>, records: Vec<Value>) {
        let name = name.into();
        Logger::info(
            "PUSHDOWN_TABLE_ADDED",
            &[("schema", &self.name), ("table", &name)],
        );
        self.tables
            .insert(name.clone(), Table::new(name, records, true));
    }

    /// Looks up a table
    pub fn table(&self, name: &str) -> SchemaResult<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// Returns true if the schema contains the table
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }
}

impl CatalogProvider for Schema {
    fn catalog(&self, table: &str) -> Option<&FieldCatalog> {
        self.tables.get(table).map(|t| t.catalog())
    }

    fn supports_pushdown(&self, table: &str) -> bool {
        self.tables.get(table).map_or(false, |t| t.is_pushdown())
    }
}
