//! Plan data model for relmem
//!
//! The operator trees consumed from the host query engine (scan, project,
//! filter), the expression language appearing inside them, and the one node
//! this crate produces: the compiled `ScanDescriptor`.
//!
//! # Invariants
//!
//! - A descriptor's projection indices always target the base table's
//!   catalog, never an intermediate projection's output
//! - A descriptor's predicate references base-table column names only
//! - Descriptors are immutable and functionally equivalent to the chain
//!   they replaced

mod descriptor;
mod explain;
mod expr;
mod node;

pub use descriptor::{ChainShape, ScanDescriptor};
pub use explain::PlanExplain;
pub use expr::{CallOp, Expr};
pub use node::OperatorNode;
