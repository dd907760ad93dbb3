//! Engine-side plan execution for relmem
//!
//! Runs operator trees over a schema. Compiled `Access` nodes delegate to
//! the row source; Project and Filter nodes that were not (or could not
//! be) pushed down are evaluated here, so an optimized plan and the chain
//! it replaced always mean the same thing.
//!
//! # Invariants
//!
//! - Deterministic: same plan + same collection = same result
//! - Strict evaluation: no coercion across value kinds; a missing column
//!   evaluates to null and null never satisfies a comparison

mod errors;
mod eval;
mod executor;
mod result;

pub use errors::{ExecutorError, ExecutorResult};
pub use eval::eval_expr;
pub use executor::QueryExecutor;
pub use result::RowSet;
