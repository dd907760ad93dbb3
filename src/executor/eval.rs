//! Engine-side expression evaluation
//!
//! Evaluates an `Expr` against one materialized row. Semantics are strict:
//! a field reference past the row's end is null, null never satisfies a
//! comparison, and no coercion happens across value kinds. `LIKE` here
//! sees the engine's own `%` wildcards (the `*` rewrite only applies to
//! pushed-down text).

use regex::Regex;
use serde_json::{json, Value};

use crate::plan::{CallOp, Expr};

use super::errors::{ExecutorError, ExecutorResult};

/// Evaluates an expression against a row
pub fn eval_expr(expr: &Expr, row: &[Value]) -> ExecutorResult<Value> {
    match expr {
        Expr::FieldRef(index) => Ok(row.get(*index).cloned().unwrap_or(Value::Null)),
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Call { op, args } => eval_call(op, args, row),
    }
}

/// Returns true if a value passes a filter
pub fn is_true(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

fn eval_call(op: &CallOp, args: &[Expr], row: &[Value]) -> ExecutorResult<Value> {
    match op {
        CallOp::Cast => {
            let arg = args
                .first()
                .ok_or_else(|| ExecutorError::Eval("CAST with no operand".to_string()))?;
            eval_expr(arg, row)
        }
        CallOp::Not => {
            let arg = args
                .first()
                .ok_or_else(|| ExecutorError::Eval("NOT with no operand".to_string()))?;
            let inner = eval_expr(arg, row)?;
            Ok(Value::Bool(!is_true(&inner)))
        }
        CallOp::And => {
            for arg in args {
                if !is_true(&eval_expr(arg, row)?) {
                    return Ok(Value::Bool(false));
                }
            }
            Ok(Value::Bool(true))
        }
        CallOp::Or => {
            for arg in args {
                if is_true(&eval_expr(arg, row)?) {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        CallOp::Eq | CallOp::Lt | CallOp::Le | CallOp::Gt | CallOp::Ge | CallOp::Ne => {
            let (left, right) = binary_operands(op, args, row)?;
            Ok(Value::Bool(compare(op, &left, &right)))
        }
        CallOp::Like => {
            let (left, right) = binary_operands(op, args, row)?;
            match (&left, &right) {
                (Value::String(s), Value::String(pattern)) => {
                    let regex = percent_regex(pattern).ok_or_else(|| {
                        ExecutorError::Eval(format!("bad LIKE pattern: {}", pattern))
                    })?;
                    Ok(Value::Bool(regex.is_match(s)))
                }
                _ => Ok(Value::Bool(false)),
            }
        }
        CallOp::Plus | CallOp::Minus | CallOp::Multiply | CallOp::Divide => {
            let (left, right) = binary_operands(op, args, row)?;
            arithmetic(op, &left, &right)
        }
        CallOp::Function(name) => Err(ExecutorError::Eval(format!(
            "unsupported function: {}",
            name
        ))),
    }
}

fn binary_operands(
    op: &CallOp,
    args: &[Expr],
    row: &[Value],
) -> ExecutorResult<(Value, Value)> {
    if args.len() != 2 {
        return Err(ExecutorError::Eval(format!(
            "{} expects 2 operands, got {}",
            op.name(),
            args.len()
        )));
    }
    Ok((eval_expr(&args[0], row)?, eval_expr(&args[1], row)?))
}

/// Strict comparison: numbers with numbers, strings with strings
fn compare(op: &CallOp, left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => (a, b),
                _ => return false,
            };
            match op {
                CallOp::Eq => a == b,
                CallOp::Lt => a < b,
                CallOp::Le => a <= b,
                CallOp::Gt => a > b,
                CallOp::Ge => a >= b,
                CallOp::Ne => a != b,
                _ => false,
            }
        }
        (Value::String(a), Value::String(b)) => match op {
            CallOp::Eq => a == b,
            CallOp::Lt => a < b,
            CallOp::Le => a <= b,
            CallOp::Gt => a > b,
            CallOp::Ge => a >= b,
            CallOp::Ne => a != b,
            _ => false,
        },
        _ => false,
    }
}

fn arithmetic(op: &CallOp, left: &Value, right: &Value) -> ExecutorResult<Value> {
    // Null propagates instead of erroring (a record with a missing column
    // should not abort the query)
    if left.is_null() || right.is_null() {
        return Ok(Value::Null);
    }
    let (a, b) = match (left, right) {
        (Value::Number(a), Value::Number(b)) => (a, b),
        _ => {
            return Err(ExecutorError::Eval(format!(
                "{} on non-numeric operands",
                op.name()
            )))
        }
    };

    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        let result = match op {
            CallOp::Plus => Some(a.wrapping_add(b)),
            CallOp::Minus => Some(a.wrapping_sub(b)),
            CallOp::Multiply => Some(a.wrapping_mul(b)),
            CallOp::Divide => None, // integer division goes through f64
            _ => None,
        };
        if let Some(n) = result {
            return Ok(json!(n));
        }
    }

    let (a, b) = match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return Err(ExecutorError::Eval(format!(
                "{} on non-finite operands",
                op.name()
            )))
        }
    };
    let result = match op {
        CallOp::Plus => a + b,
        CallOp::Minus => a - b,
        CallOp::Multiply => a * b,
        CallOp::Divide => a / b,
        _ => unreachable!("arithmetic called with non-arithmetic op"),
    };
    Ok(json!(result))
}

/// Builds an anchored regex from a `%`-wildcard pattern
fn percent_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::with_capacity(pattern.len() + 2);
    source.push('^');
    for (i, chunk) in pattern.split('%').enumerate() {
        if i > 0 {
            source.push_str(".*");
        }
        source.push_str(&regex::escape(chunk));
    }
    source.push('$');
    Regex::new(&source).ok()
}
