//! Pushdown compiler for relmem
//!
//! Recognizes Project/Filter chains over a table scan and compiles their
//! combined effect into a single `ScanDescriptor`: projection as base-table
//! column indices plus a textual predicate.
//!
//! # Invariants
//!
//! - Total-or-abort: if any part of a chain cannot be translated, no
//!   rewrite happens at all (partial pushdown would lose semantics)
//! - "Cannot push down" is `None`, never an error; the plan is left
//!   untouched and the engine falls back to evaluating the chain itself
//! - Every call is a pure function of its inputs plus the immutable
//!   catalog; nothing blocks or retains state across calls

mod escape;
mod matcher;
mod predicate;
mod projection;

pub use escape::search_escape;
pub use matcher::{CatalogProvider, PushdownMatcher};
pub use predicate::translate_predicate;
pub use projection::{
    resolve_projection, resolve_stacked_projection, simple_indices, ResolvedProjection,
};
