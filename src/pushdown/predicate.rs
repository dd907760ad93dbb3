//! Predicate translation
//!
//! Compiles a boolean expression tree into the textual predicate DSL, or
//! reports "not expressible". Pure functions returning owned strings; the
//! caller composes the pieces.
//!
//! Expressiveness boundary: a field reference is accepted only as the
//! first operand of a call. Chains whose predicates put the field on the
//! right fall back to engine-side evaluation.

use serde_json::Value;

use crate::plan::{CallOp, Expr};

use super::escape::search_escape;

/// Translates a filter condition against the given input column names
///
/// Returns `None` when any part of the condition is outside the supported
/// operator set, a field reference sits outside operand position 0, a
/// literal is neither numeric nor text, or an unquoted text literal spells
/// one of the column names (it would parse back as a reference). The whole
/// pushdown attempt aborts on `None`; no partial predicate is ever emitted.
pub fn translate_predicate(condition: &Expr, field_names: &[String]) -> Option<String> {
    match condition {
        Expr::Call { op, args } => translate_call(op, args, field_names),
        // A bare field or literal is not a boolean condition
        Expr::FieldRef(_) | Expr::Literal(_) => None,
    }
}

/// Returns true if the operator is expressible in the predicate DSL
fn is_supported(op: &CallOp) -> bool {
    match op {
        CallOp::Cast
        | CallOp::Eq
        | CallOp::Lt
        | CallOp::Le
        | CallOp::Gt
        | CallOp::Ge
        | CallOp::Ne
        | CallOp::Like
        | CallOp::And
        | CallOp::Or
        | CallOp::Not => true,
        CallOp::Plus
        | CallOp::Minus
        | CallOp::Multiply
        | CallOp::Divide
        | CallOp::Function(_) => false,
    }
}

fn translate_call(op: &CallOp, args: &[Expr], field_names: &[String]) -> Option<String> {
    if !is_supported(op) {
        return None;
    }

    let like = matches!(op, CallOp::Like);
    let mut out = String::new();

    match op {
        // NOT is pre-pended, then its operand follows
        CallOp::Not => out.push_str(" NOT "),
        // Coercion is a no-op for textual predicates: translate the
        // operand directly
        CallOp::Cast => return translate_operand(false, 0, args.first()?, field_names),
        _ => {}
    }

    for (position, operand) in args.iter().enumerate() {
        out.push_str(&translate_operand(like, position, operand, field_names)?);
        if position == 0 {
            if let Some(symbol) = op.infix_symbol() {
                out.push(' ');
                out.push_str(symbol);
                out.push(' ');
            }
        }
    }

    Some(out)
}

fn translate_operand(
    like: bool,
    position: usize,
    operand: &Expr,
    field_names: &[String],
) -> Option<String> {
    match operand {
        Expr::Call { op, args } => {
            let inner = translate_call(op, args, field_names)?;
            Some(format!("({})", inner))
        }
        Expr::FieldRef(index) => {
            // Left-position-only rule
            if position != 0 {
                return None;
            }
            field_names.get(*index).cloned()
        }
        Expr::Literal(value) => literal_text(like, value, field_names),
    }
}

/// Renders a literal, or `None` for kinds the DSL cannot carry
fn literal_text(like: bool, value: &Value, field_names: &[String]) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => {
            let text = if like {
                // LIKE wildcards: % becomes * before escaping
                s.replace('%', "*")
            } else {
                s.clone()
            };
            let escaped = search_escape(&text);
            // A safe literal stays unquoted, so one that spells a column
            // name would be read back as a column reference. Abort instead
            // of pushing down a predicate that means something else.
            if !escaped.starts_with('"') && field_names.iter().any(|n| *n == escaped) {
                return None;
            }
            Some(escaped)
        }
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}
