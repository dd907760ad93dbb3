//! relmem - a relational pushdown compiler for in-memory JSON collections
//!
//! Exposes a schema-less collection of JSON records as a relational table
//! and compiles Project/Filter chains sitting above a table scan down to a
//! single access request (projection indices + textual predicate) the row
//! source can satisfy directly.
//!
//! # Design Principles
//!
//! - Total-or-abort: a chain is either compiled completely or left untouched
//! - Deterministic: same plan + same catalog = same descriptor
//! - Silent no-op: "cannot push down" is an absence, never an error

pub mod catalog;
pub mod executor;
pub mod observability;
pub mod optimizer;
pub mod plan;
pub mod pushdown;
pub mod rows;
pub mod schema;
