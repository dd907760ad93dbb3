//! Observability for relmem
//!
//! Structured logging for the pushdown compiler and the row source.
//!
//! # Principles
//!
//! 1. Observability is read-only: no side effects on planning or execution
//! 2. Synchronous, no buffering, no background threads
//! 3. Deterministic output (alphabetical field ordering)
//! 4. One log line = one event
//!
//! The matcher logs rule matches, resolved field names, compiled predicate
//! text and rename pairs; the row source logs row-access failures and
//! predicates it could not apply.

mod logger;

pub use logger::{Logger, Severity};
