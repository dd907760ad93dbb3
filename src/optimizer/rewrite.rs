//! The rewrite driver
//!
//! Walks a plan top-down offering each node, with everything below it, to
//! the registered rules in priority order. On a match the whole chain is
//! replaced by the compiled descriptor; otherwise the walk descends. A
//! bare scan of a pushdown table that no rule claimed compiles to the
//! identity descriptor (all columns, no predicate), so execution always
//! goes through the row source for such tables.

use crate::observability::Logger;
use crate::plan::{OperatorNode, ScanDescriptor};
use crate::pushdown::{CatalogProvider, PushdownMatcher};

use super::rules::{RuleHandle, RuleRegistry};

/// Plan optimizer holding the registered pushdown rules
pub struct Optimizer<'a, C: CatalogProvider> {
    catalogs: &'a C,
    registry: RuleRegistry,
}

impl<'a, C: CatalogProvider> Optimizer<'a, C> {
    /// Creates an optimizer with all four pushdown rules registered
    pub fn new(catalogs: &'a C) -> Self {
        Self {
            catalogs,
            registry: RuleRegistry::with_default_rules(),
        }
    }

    /// Creates an optimizer with no rules (nothing is rewritten except
    /// bare pushdown scans)
    pub fn without_rules(catalogs: &'a C) -> Self {
        Self {
            catalogs,
            registry: RuleRegistry::new(),
        }
    }

    /// Installs a rule; idempotent
    pub fn register(&mut self, shape: crate::plan::ChainShape) -> RuleHandle {
        self.registry.register(shape)
    }

    /// The registry (for diagnostics)
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Rewrites a plan
    ///
    /// Chains that fail to compile are left untouched for engine-side
    /// evaluation; this is a designed silent no-op, not an error.
    pub fn optimize(&mut self, plan: OperatorNode) -> OperatorNode {
        let shapes: Vec<_> = self.registry.shapes().to_vec();
        let matcher = PushdownMatcher::new(self.catalogs);

        for shape in shapes {
            if let Some(descriptor) = matcher.try_match(shape, &plan) {
                // Keep the registry populated for other chains in the plan
                for rule in descriptor.rules() {
                    self.registry.register(rule);
                }
                Logger::info(
                    "PLAN_REWRITTEN",
                    &[
                        ("label", &descriptor.label()),
                        ("table", descriptor.table()),
                    ],
                );
                return OperatorNode::Access(descriptor);
            }
        }

        match plan {
            OperatorNode::Project { exprs, row, input } => OperatorNode::Project {
                exprs,
                row,
                input: Box::new(self.optimize(*input)),
            },
            OperatorNode::Filter { condition, input } => OperatorNode::Filter {
                condition,
                input: Box::new(self.optimize(*input)),
            },
            OperatorNode::Scan { table } => {
                // A pushdown table is always accessed through a descriptor,
                // even when no rule fired above it
                if self.catalogs.supports_pushdown(&table) {
                    if let Some(catalog) = self.catalogs.catalog(&table) {
                        let descriptor = ScanDescriptor::identity(&table, catalog);
                        for rule in descriptor.rules() {
                            self.registry.register(rule);
                        }
                        return OperatorNode::Access(descriptor);
                    }
                }
                OperatorNode::Scan { table }
            }
            leaf @ OperatorNode::Access(_) => leaf,
        }
    }
}
