//! Compiled scan descriptors
//!
//! A `ScanDescriptor` is the immutable node the pushdown compiler inserts
//! back into a plan: the combined effect of a matched Project/Filter chain,
//! resolved to base-table projection indices and a textual predicate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::FieldCatalog;

/// The four recognized operator-chain shapes, in priority order
///
/// Identifies which rule produced a descriptor; replaces reliance on a
/// human-readable description string for rule identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainShape {
    /// Project -> Filter -> Project -> Scan
    ProjectFilterProject,
    /// Filter -> Project -> Scan
    FilterProject,
    /// Filter -> Scan
    Filter,
    /// Project -> Scan
    Project,
}

impl ChainShape {
    /// All shapes in match priority order (first structural match wins)
    pub const ALL: [ChainShape; 4] = [
        ChainShape::ProjectFilterProject,
        ChainShape::FilterProject,
        ChainShape::Filter,
        ChainShape::Project,
    ];

    /// Human-readable rule name
    pub fn as_str(&self) -> &'static str {
        match self {
            ChainShape::ProjectFilterProject => "project on filter on project",
            ChainShape::FilterProject => "filter on project",
            ChainShape::Filter => "filter",
            ChainShape::Project => "project",
        }
    }
}

impl fmt::Display for ChainShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable compiled table access
///
/// Functionally equivalent to the operator chain it replaced: same output
/// schema (possibly reordered/renamed) and same row set once the row source
/// honors the predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanDescriptor {
    table: String,
    projection: Vec<usize>,
    predicate: Option<String>,
    shape: ChainShape,
    renames: Vec<(String, String)>,
}

impl ScanDescriptor {
    /// Creates a descriptor from compiled parts
    pub fn new(
        table: impl Into<String>,
        projection: Vec<usize>,
        predicate: Option<String>,
        shape: ChainShape,
        renames: Vec<(String, String)>,
    ) -> Self {
        Self {
            table: table.into(),
            projection,
            predicate,
            shape,
            renames,
        }
    }

    /// The identity descriptor: all columns, no predicate
    ///
    /// This is what a bare scan of a pushdown table compiles to when no
    /// rule fires above it.
    pub fn identity(table: impl Into<String>, catalog: &FieldCatalog) -> Self {
        Self {
            table: table.into(),
            projection: catalog.identity_projection(),
            predicate: None,
            shape: ChainShape::Project,
            renames: Vec::new(),
        }
    }

    /// Base table name
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Projection as base-table column indices
    pub fn projection(&self) -> &[usize] {
        &self.projection
    }

    /// Compiled predicate text, if the chain carried a filter
    pub fn predicate(&self) -> Option<&str> {
        self.predicate.as_deref()
    }

    /// Which chain shape produced this descriptor
    pub fn shape(&self) -> ChainShape {
        self.shape
    }

    /// Rename pairs `(inner name, outer name)` collected for diagnostics
    pub fn renames(&self) -> &[(String, String)] {
        &self.renames
    }

    /// Human-readable scan label
    pub fn label(&self) -> String {
        format!("pushdown scan [{}]", self.shape.as_str())
    }

    /// The rules a plan containing this descriptor keeps registered
    ///
    /// Every shape bottoms out at a bare scan, so nothing re-fires on top
    /// of an `Access` leaf; re-registration only keeps the registry
    /// populated for other chains in the same plan.
    pub fn rules(&self) -> [ChainShape; 4] {
        ChainShape::ALL
    }
}
