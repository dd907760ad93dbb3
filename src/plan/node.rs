//! Operator nodes
//!
//! The relational operators the host engine hands to the pushdown compiler.
//! Chains are linear: Project/Filter nodes stacked over a table scan.
//! `Access` is the terminal node this crate inserts back into a plan.

use crate::catalog::Field;

use super::descriptor::ScanDescriptor;
use super::expr::Expr;

/// A node in a query plan
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorNode {
    /// Scan of a named table
    Scan {
        /// Table name, resolved through the schema's catalog
        table: String,
    },
    /// Projection: output expressions plus the node's own declared row type
    Project {
        /// Output expressions, one per column
        exprs: Vec<Expr>,
        /// Declared output field list (names + types), used to detect renames
        row: Vec<Field>,
        /// Input operator
        input: Box<OperatorNode>,
    },
    /// Filter with a single boolean condition
    Filter {
        /// The row-filtering condition
        condition: Expr,
        /// Input operator
        input: Box<OperatorNode>,
    },
    /// Compiled physical table access produced by the pushdown compiler
    Access(ScanDescriptor),
}

impl OperatorNode {
    /// A scan node
    pub fn scan(table: impl Into<String>) -> Self {
        OperatorNode::Scan {
            table: table.into(),
        }
    }

    /// A projection node
    pub fn project(exprs: Vec<Expr>, row: Vec<Field>, input: OperatorNode) -> Self {
        OperatorNode::Project {
            exprs,
            row,
            input: Box::new(input),
        }
    }

    /// A filter node
    pub fn filter(condition: Expr, input: OperatorNode) -> Self {
        OperatorNode::Filter {
            condition,
            input: Box::new(input),
        }
    }

    /// Node name for explain output
    pub fn name(&self) -> &'static str {
        match self {
            OperatorNode::Scan { .. } => "Scan",
            OperatorNode::Project { .. } => "Project",
            OperatorNode::Filter { .. } => "Filter",
            OperatorNode::Access(_) => "Access",
        }
    }

    /// The node's input, if it has one
    ///
    /// Scans and descriptors are leaves (a descriptor is copied with zero
    /// children).
    pub fn input(&self) -> Option<&OperatorNode> {
        match self {
            OperatorNode::Project { input, .. } | OperatorNode::Filter { input, .. } => {
                Some(input)
            }
            OperatorNode::Scan { .. } | OperatorNode::Access(_) => None,
        }
    }

    /// Returns true if this node is a leaf
    pub fn is_leaf(&self) -> bool {
        self.input().is_none()
    }
}
