//! Plan execution over a schema

use crate::plan::{OperatorNode, ScanDescriptor};
use crate::rows::{Row, RowSource};
use crate::schema::Schema;

use super::errors::ExecutorResult;
use super::eval::{eval_expr, is_true};
use super::result::RowSet;

/// Executes operator trees against a schema's tables
pub struct QueryExecutor<'a> {
    schema: &'a Schema,
}

impl<'a> QueryExecutor<'a> {
    /// Creates an executor over a schema
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Executes a plan and returns its rows
    pub fn execute(&self, plan: &OperatorNode) -> ExecutorResult<RowSet> {
        match plan {
            OperatorNode::Scan { table } => {
                let table = self.schema.table(table)?;
                let rows = table.fetch(&table.catalog().identity_projection(), None);
                Ok(RowSet::new(table.catalog().names(), rows))
            }
            OperatorNode::Access(descriptor) => self.execute_access(descriptor),
            OperatorNode::Project { exprs, row, input } => {
                let child = self.execute(input)?;
                let mut rows = Vec::with_capacity(child.len());
                for source in child.iter() {
                    let mut projected: Row = Vec::with_capacity(exprs.len());
                    for expr in exprs {
                        projected.push(eval_expr(expr, source)?);
                    }
                    rows.push(projected);
                }
                let columns = row.iter().map(|f| f.name.clone()).collect();
                Ok(RowSet::new(columns, rows))
            }
            OperatorNode::Filter { condition, input } => {
                let child = self.execute(input)?;
                let columns = child.columns().to_vec();
                let mut rows = Vec::new();
                for source in child.iter() {
                    if is_true(&eval_expr(condition, source)?) {
                        rows.push(source.clone());
                    }
                }
                Ok(RowSet::new(columns, rows))
            }
        }
    }

    fn execute_access(&self, descriptor: &ScanDescriptor) -> ExecutorResult<RowSet> {
        let table = self.schema.table(descriptor.table())?;
        let rows = table.fetch(descriptor.projection(), descriptor.predicate());

        // Column names follow the projection, with the chain's renames applied
        let columns = descriptor
            .projection()
            .iter()
            .map(|&index| {
                let base = table
                    .catalog()
                    .field(index)
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                descriptor
                    .renames()
                    .iter()
                    .find(|(inner, _)| *inner == base)
                    .map(|(_, outer)| outer.clone())
                    .unwrap_or(base)
            })
            .collect();

        Ok(RowSet::new(columns, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Field, FieldType};
    use crate::optimizer::Optimizer;
    use crate::plan::{ChainShape, Expr};
    use crate::schema::SchemaError;
    use serde_json::{json, Value};

    fn schema() -> Schema {
        let mut schema = Schema::new("hr");
        schema.add_pushdown_table(
            "users",
            vec![
                json!({"Age": 29, "Country": "India", "Name": "Abishek"}),
                json!({"Age": 35, "Country": "Japan", "Name": "Yuki"}),
                json!({"Age": 18, "Country": "India", "Name": "Priya"}),
            ],
        );
        schema
    }

    #[test]
    fn test_scan_returns_all_rows() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let set = executor.execute(&OperatorNode::scan("users")).unwrap();
        assert_eq!(set.columns(), &["Age", "Country", "Name"]);
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.rows()[0],
            vec![json!(29), json!("India"), json!("Abishek")]
        );
    }

    #[test]
    fn test_unknown_table_is_an_error() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        assert_eq!(
            executor.execute(&OperatorNode::scan("missing")),
            Err(SchemaError::UnknownTable("missing".to_string()).into())
        );
    }

    #[test]
    fn test_engine_side_filter_and_project() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let plan = OperatorNode::project(
            vec![Expr::field(2)],
            vec![Field::new("Name", 0, FieldType::Text)],
            OperatorNode::filter(
                Expr::eq(Expr::field(1), Expr::literal("India")),
                OperatorNode::scan("users"),
            ),
        );

        let set = executor.execute(&plan).unwrap();
        assert_eq!(set.columns(), &["Name"]);
        assert_eq!(
            set.rows(),
            &[vec![json!("Abishek")], vec![json!("Priya")]]
        );
    }

    #[test]
    fn test_access_applies_projection_and_predicate() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let descriptor = ScanDescriptor::new(
            "users",
            vec![2, 0],
            Some("Age < 30".to_string()),
            ChainShape::FilterProject,
            Vec::new(),
        );

        let set = executor
            .execute(&OperatorNode::Access(descriptor))
            .unwrap();
        assert_eq!(set.columns(), &["Name", "Age"]);
        assert_eq!(
            set.rows(),
            &[
                vec![json!("Abishek"), json!(29)],
                vec![json!("Priya"), json!(18)]
            ]
        );
    }

    #[test]
    fn test_access_applies_renames() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let descriptor = ScanDescriptor::new(
            "users",
            vec![0, 2],
            None,
            ChainShape::ProjectFilterProject,
            vec![("Age".to_string(), "YearsOld".to_string())],
        );

        let set = executor
            .execute(&OperatorNode::Access(descriptor))
            .unwrap();
        assert_eq!(set.columns(), &["YearsOld", "Name"]);
    }

    #[test]
    fn test_optimized_plan_matches_raw_plan() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);
        let mut optimizer = Optimizer::new(&schema);

        let plan = OperatorNode::filter(
            Expr::lt(Expr::field(0), Expr::literal(30)),
            OperatorNode::project(
                vec![Expr::field(0), Expr::field(2)],
                vec![
                    Field::new("Age", 0, FieldType::Int),
                    Field::new("Name", 1, FieldType::Text),
                ],
                OperatorNode::scan("users"),
            ),
        );

        let raw = executor.execute(&plan).unwrap();
        let optimized = executor.execute(&optimizer.optimize(plan)).unwrap();

        assert_eq!(raw.rows(), optimized.rows());
        assert_eq!(raw.columns(), optimized.columns());
    }

    #[test]
    fn test_eval_error_propagates() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let plan = OperatorNode::filter(
            Expr::call(
                crate::plan::CallOp::Function("UPPER".into()),
                vec![Expr::field(2)],
            ),
            OperatorNode::scan("users"),
        );

        assert!(matches!(
            executor.execute(&plan),
            Err(super::super::errors::ExecutorError::Eval(_))
        ));
    }

    #[test]
    fn test_filter_keeps_columns() {
        let schema = schema();
        let executor = QueryExecutor::new(&schema);

        let plan = OperatorNode::filter(
            Expr::gt(Expr::field(0), Expr::literal(100)),
            OperatorNode::scan("users"),
        );

        let set = executor.execute(&plan).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.columns(), &["Age", "Country", "Name"]);
        let _: &[Vec<Value>] = set.rows();
    }
}
