//! Schema registry for relmem
//!
//! A schema is a named set of in-memory tables; a table is a collection of
//! JSON records of the same shape. Tables registered as pushdown tables
//! participate in chain rewriting; plain tables are always evaluated
//! engine-side.

mod registry;

pub use registry::{Schema, SchemaError, SchemaResult, Table};
