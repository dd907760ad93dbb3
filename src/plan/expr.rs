//! Expression trees
//!
//! The host engine's expression language as seen by the pushdown compiler:
//! positional field references, JSON literals, and operator calls. The
//! operator set is deliberately wider than what the predicate translator
//! supports, so "unsupported operator" is a representable input rather than
//! a silent fallthrough.

use serde_json::Value;

/// Operator kinds appearing in `Expr::Call`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOp {
    /// Type coercion (a no-op for textual predicates)
    Cast,
    /// Equality `=`
    Eq,
    /// Less than `<`
    Lt,
    /// Less than or equal `<=`
    Le,
    /// Greater than `>`
    Gt,
    /// Greater than or equal `>=`
    Ge,
    /// Not equal `<>`
    Ne,
    /// Pattern match `LIKE`
    Like,
    /// Conjunction
    And,
    /// Disjunction
    Or,
    /// Negation (prefix)
    Not,
    /// Addition (engine-side only, not pushable)
    Plus,
    /// Subtraction (engine-side only, not pushable)
    Minus,
    /// Multiplication (engine-side only, not pushable)
    Multiply,
    /// Division (engine-side only, not pushable)
    Divide,
    /// A named function call (engine-side only, not pushable)
    Function(String),
}

impl CallOp {
    /// Canonical infix symbol, if this operator is binary infix
    pub fn infix_symbol(&self) -> Option<&'static str> {
        match self {
            CallOp::Eq => Some("="),
            CallOp::Lt => Some("<"),
            CallOp::Le => Some("<="),
            CallOp::Gt => Some(">"),
            CallOp::Ge => Some(">="),
            CallOp::Ne => Some("<>"),
            CallOp::Like => Some("LIKE"),
            CallOp::And => Some("AND"),
            CallOp::Or => Some("OR"),
            CallOp::Plus => Some("+"),
            CallOp::Minus => Some("-"),
            CallOp::Multiply => Some("*"),
            CallOp::Divide => Some("/"),
            CallOp::Cast | CallOp::Not | CallOp::Function(_) => None,
        }
    }

    /// Operator name for explain output
    pub fn name(&self) -> &str {
        match self {
            CallOp::Cast => "CAST",
            CallOp::Eq => "=",
            CallOp::Lt => "<",
            CallOp::Le => "<=",
            CallOp::Gt => ">",
            CallOp::Ge => ">=",
            CallOp::Ne => "<>",
            CallOp::Like => "LIKE",
            CallOp::And => "AND",
            CallOp::Or => "OR",
            CallOp::Not => "NOT",
            CallOp::Plus => "+",
            CallOp::Minus => "-",
            CallOp::Multiply => "*",
            CallOp::Divide => "/",
            CallOp::Function(name) => name,
        }
    }
}

/// An expression: field reference, literal, or operator call
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Reference to a position in the input row
    FieldRef(usize),
    /// A literal value
    Literal(Value),
    /// An operator applied to operands
    Call { op: CallOp, args: Vec<Expr> },
}

impl Expr {
    /// A field reference
    pub fn field(index: usize) -> Self {
        Expr::FieldRef(index)
    }

    /// A literal
    pub fn literal(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// A call with explicit operator and operands
    pub fn call(op: CallOp, args: Vec<Expr>) -> Self {
        Expr::Call { op, args }
    }

    /// `a = b`
    pub fn eq(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Eq, vec![a, b])
    }

    /// `a <> b`
    pub fn ne(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Ne, vec![a, b])
    }

    /// `a < b`
    pub fn lt(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Lt, vec![a, b])
    }

    /// `a <= b`
    pub fn le(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Le, vec![a, b])
    }

    /// `a > b`
    pub fn gt(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Gt, vec![a, b])
    }

    /// `a >= b`
    pub fn ge(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Ge, vec![a, b])
    }

    /// `a LIKE b`
    pub fn like(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Like, vec![a, b])
    }

    /// `a AND b`
    pub fn and(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::And, vec![a, b])
    }

    /// `a OR b`
    pub fn or(a: Expr, b: Expr) -> Self {
        Expr::call(CallOp::Or, vec![a, b])
    }

    /// `NOT a`
    pub fn not(a: Expr) -> Self {
        Expr::call(CallOp::Not, vec![a])
    }

    /// `CAST(a)`
    pub fn cast(a: Expr) -> Self {
        Expr::call(CallOp::Cast, vec![a])
    }

    /// Returns true if this is a plain field reference
    pub fn is_field_ref(&self) -> bool {
        matches!(self, Expr::FieldRef(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infix_symbols() {
        assert_eq!(CallOp::Eq.infix_symbol(), Some("="));
        assert_eq!(CallOp::Le.infix_symbol(), Some("<="));
        assert_eq!(CallOp::Ne.infix_symbol(), Some("<>"));
        assert_eq!(CallOp::Like.infix_symbol(), Some("LIKE"));
        assert_eq!(CallOp::And.infix_symbol(), Some("AND"));
    }

    #[test]
    fn test_prefix_ops_have_no_infix_symbol() {
        assert_eq!(CallOp::Not.infix_symbol(), None);
        assert_eq!(CallOp::Cast.infix_symbol(), None);
        assert_eq!(CallOp::Function("UPPER".into()).infix_symbol(), None);
    }

    #[test]
    fn test_builder_helpers() {
        let expr = Expr::and(
            Expr::lt(Expr::field(0), Expr::literal(29)),
            Expr::eq(Expr::field(1), Expr::literal("India")),
        );

        match expr {
            Expr::Call { op: CallOp::And, args } => {
                assert_eq!(args.len(), 2);
                assert!(matches!(&args[0], Expr::Call { op: CallOp::Lt, .. }));
            }
            other => panic!("unexpected expr: {:?}", other),
        }
    }

    #[test]
    fn test_literal_holds_json_value() {
        assert_eq!(Expr::literal(5), Expr::Literal(json!(5)));
        assert_eq!(Expr::literal("Ab%"), Expr::Literal(json!("Ab%")));
    }
}
