//! Field catalog for relmem
//!
//! Maps a table's column names to stable positional indices and types.
//! A catalog is derived once, from the first record of a collection, and
//! is immutable afterwards: every projection index and predicate column
//! name produced by the pushdown compiler resolves against it.

mod field;
mod inspect;

pub use field::{Field, FieldCatalog, FieldType};
pub use inspect::inspect_record;
