//! Row source for relmem
//!
//! Turns JSON records into positional rows through a table's catalog and
//! applies the advisory predicate a descriptor carries.
//!
//! # Contract
//!
//! - `fetch(projection, predicate)` yields one deterministic row sequence
//!   for a fixed underlying collection
//! - A record whose value extraction fails contributes a shorter row
//!   (missing column), is logged, and never aborts the fetch
//! - The predicate is advisory: one the source cannot parse is logged and
//!   ignored, never an error

mod filter;
mod source;

pub use filter::CompiledPredicate;
pub use source::{extract_value, materialize_row, Row, RowSource};
