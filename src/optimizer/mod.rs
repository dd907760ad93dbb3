//! Plan rewriting for relmem
//!
//! The thin engine seam around the pushdown compiler: a rule registry
//! (`register(shape) -> RuleHandle`, priority = registration order) and a
//! driver that walks a plan, fires the first matching rule per chain, and
//! converts leftover bare scans of pushdown tables into identity
//! descriptors. A freshly inserted descriptor re-registers all four rules
//! so later passes can still rewrite unrelated chains.

mod rewrite;
mod rules;

pub use rewrite::Optimizer;
pub use rules::{RuleHandle, RuleRegistry};
