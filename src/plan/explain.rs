//! Explain output for plan trees
//!
//! Produces deterministic, human-readable renderings of operator chains,
//! including descriptor terms (projection indices, predicate text, shape
//! label, renames).

use std::fmt;

use serde_json::Value;

use super::expr::{CallOp, Expr};
use super::node::OperatorNode;

/// Renders a plan tree for explain output
#[derive(Debug, Clone)]
pub struct PlanExplain<'a> {
    plan: &'a OperatorNode,
}

impl<'a> PlanExplain<'a> {
    /// Creates an explain view over a plan
    pub fn new(plan: &'a OperatorNode) -> Self {
        Self { plan }
    }

    fn write_node(
        f: &mut fmt::Formatter<'_>,
        node: &OperatorNode,
        depth: usize,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match node {
            OperatorNode::Scan { table } => {
                writeln!(f, "{}Scan(table={})", indent, table)
            }
            OperatorNode::Project { exprs, row, input } => {
                let cols: Vec<String> = exprs
                    .iter()
                    .zip(row.iter())
                    .map(|(e, field)| format!("{}={}", field.name, render_expr(e)))
                    .collect();
                writeln!(f, "{}Project({})", indent, cols.join(", "))?;
                Self::write_node(f, input, depth + 1)
            }
            OperatorNode::Filter { condition, input } => {
                writeln!(f, "{}Filter(condition={})", indent, render_expr(condition))?;
                Self::write_node(f, input, depth + 1)
            }
            OperatorNode::Access(descriptor) => {
                write!(
                    f,
                    "{}Access(table={}, projection={:?}",
                    indent,
                    descriptor.table(),
                    descriptor.projection()
                )?;
                if let Some(predicate) = descriptor.predicate() {
                    write!(f, ", predicate={}", predicate)?;
                }
                if !descriptor.renames().is_empty() {
                    let renames: Vec<String> = descriptor
                        .renames()
                        .iter()
                        .map(|(from, to)| format!("{}->{}", from, to))
                        .collect();
                    write!(f, ", renames=[{}]", renames.join(", "))?;
                }
                writeln!(f, ", label={})", descriptor.label())
            }
        }
    }
}

impl fmt::Display for PlanExplain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write_node(f, self.plan, 0)
    }
}

/// Renders one expression
///
/// Field references render positionally (`$0`), literals as JSON text,
/// calls in infix form where the operator has a symbol.
pub fn render_expr(expr: &Expr) -> String {
    match expr {
        Expr::FieldRef(index) => format!("${}", index),
        Expr::Literal(Value::String(s)) => format!("'{}'", s),
        Expr::Literal(value) => value.to_string(),
        Expr::Call { op, args } => match op {
            CallOp::Not => match args.first() {
                Some(arg) => format!("NOT ({})", render_expr(arg)),
                None => "NOT ()".to_string(),
            },
            CallOp::Cast => match args.first() {
                Some(arg) => format!("CAST({})", render_expr(arg)),
                None => "CAST()".to_string(),
            },
            _ => match (op.infix_symbol(), args.as_slice()) {
                (Some(symbol), [left, right]) => {
                    format!("({} {} {})", render_expr(left), symbol, render_expr(right))
                }
                _ => {
                    let rendered: Vec<String> = args.iter().map(render_expr).collect();
                    format!("{}({})", op.name(), rendered.join(", "))
                }
            },
        },
    }
}
