//! Rule registration
//!
//! Rules are chain shapes; priority is registration order and the first
//! structural match wins. Registration is idempotent: re-registering a
//! shape returns the handle it already has.

use crate::plan::ChainShape;

/// Handle to a registered rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHandle(usize);

impl RuleHandle {
    /// Position of the rule in priority order
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Ordered set of registered rules
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    shapes: Vec<ChainShape>,
}

impl RuleRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Creates a registry with all four rules in priority order
    pub fn with_default_rules() -> Self {
        let mut registry = Self::new();
        for shape in ChainShape::ALL {
            registry.register(shape);
        }
        registry
    }

    /// Installs a rule; idempotent
    pub fn register(&mut self, shape: ChainShape) -> RuleHandle {
        if let Some(position) = self.shapes.iter().position(|s| *s == shape) {
            return RuleHandle(position);
        }
        self.shapes.push(shape);
        RuleHandle(self.shapes.len() - 1)
    }

    /// Registered shapes in priority order
    pub fn shapes(&self) -> &[ChainShape] {
        &self.shapes
    }

    /// Number of registered rules
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns true if no rules are registered
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
