//! Chain matching and descriptor compilation
//!
//! Recognizes the four supported operator-chain shapes over a scan, drives
//! projection resolution and predicate translation, and produces the
//! compiled `ScanDescriptor`. A chain that fails any step produces no
//! rewrite at all; the plan is left for the engine to evaluate itself.

use crate::catalog::{Field, FieldCatalog};
use crate::observability::Logger;
use crate::plan::{ChainShape, Expr, OperatorNode, ScanDescriptor};

use super::predicate::translate_predicate;
use super::projection::{resolve_projection, resolve_stacked_projection, simple_indices};

/// Catalog access for the tables a matcher may compile against
///
/// The narrow seam to the schema: the matcher never sees records, only
/// column metadata and the pushdown opt-in flag.
pub trait CatalogProvider {
    /// Catalog for a table, if it exists
    fn catalog(&self, table: &str) -> Option<&FieldCatalog>;

    /// Whether the table participates in pushdown at all
    fn supports_pushdown(&self, table: &str) -> bool;
}

/// One projection layer as seen in a chain
struct ProjectLayer<'a> {
    exprs: &'a [Expr],
    row: &'a [Field],
}

/// A destructured candidate chain, bottom-up from the scan
struct ChainParts<'a> {
    top: Option<ProjectLayer<'a>>,
    filter: Option<&'a Expr>,
    bottom: Option<ProjectLayer<'a>>,
    table: &'a str,
}

/// Matches operator chains and compiles them into scan descriptors
pub struct PushdownMatcher<'a, C: CatalogProvider> {
    catalogs: &'a C,
}

impl<'a, C: CatalogProvider> PushdownMatcher<'a, C> {
    /// Creates a matcher over the given catalogs
    pub fn new(catalogs: &'a C) -> Self {
        Self { catalogs }
    }

    /// Attempts to compile `chain` under one rule shape
    ///
    /// Returns `None` when the chain does not have exactly this shape, the
    /// scanned table is unknown or not pushdown-enabled, or any part of
    /// the chain cannot be translated (total-or-abort).
    pub fn try_match(&self, shape: ChainShape, chain: &OperatorNode) -> Option<ScanDescriptor> {
        let parts = Self::destructure(shape, chain)?;
        self.compile(shape, parts)
    }

    /// Structural check: does `chain` have exactly the given shape?
    fn destructure(shape: ChainShape, chain: &OperatorNode) -> Option<ChainParts<'_>> {
        match (shape, chain) {
            (
                ChainShape::ProjectFilterProject,
                OperatorNode::Project {
                    exprs: top_exprs,
                    row: top_row,
                    input,
                },
            ) => match input.as_ref() {
                OperatorNode::Filter { condition, input } => match input.as_ref() {
                    OperatorNode::Project { exprs, row, input } => match input.as_ref() {
                        OperatorNode::Scan { table } => Some(ChainParts {
                            top: Some(ProjectLayer {
                                exprs: top_exprs,
                                row: top_row,
                            }),
                            filter: Some(condition),
                            bottom: Some(ProjectLayer { exprs, row }),
                            table,
                        }),
                        _ => None,
                    },
                    _ => None,
                },
                _ => None,
            },
            (
                ChainShape::FilterProject,
                OperatorNode::Filter { condition, input },
            ) => match input.as_ref() {
                OperatorNode::Project { exprs, row, input } => match input.as_ref() {
                    OperatorNode::Scan { table } => Some(ChainParts {
                        top: None,
                        filter: Some(condition),
                        bottom: Some(ProjectLayer { exprs, row }),
                        table,
                    }),
                    _ => None,
                },
                _ => None,
            },
            (ChainShape::Filter, OperatorNode::Filter { condition, input }) => {
                match input.as_ref() {
                    OperatorNode::Scan { table } => Some(ChainParts {
                        top: None,
                        filter: Some(condition),
                        bottom: None,
                        table,
                    }),
                    _ => None,
                }
            }
            (ChainShape::Project, OperatorNode::Project { exprs, row, input }) => {
                match input.as_ref() {
                    OperatorNode::Scan { table } => Some(ChainParts {
                        top: None,
                        filter: None,
                        bottom: Some(ProjectLayer { exprs, row }),
                        table,
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Compiles a destructured chain into a descriptor, bottom-up
    fn compile(&self, shape: ChainShape, parts: ChainParts<'_>) -> Option<ScanDescriptor> {
        if !self.catalogs.supports_pushdown(parts.table) {
            return None;
        }
        let catalog = self.catalogs.catalog(parts.table)?;
        let base_fields = catalog.fields().to_vec();

        // Bottom projection narrows/reorders the scanned columns
        let bottom_fields = match &parts.bottom {
            Some(layer) => resolve_projection(layer.exprs, &base_fields, layer.row)?,
            None => base_fields,
        };

        // The filter resolves names against whatever the bottom layer produced
        let predicate = match parts.filter {
            Some(condition) => {
                let names: Vec<String> =
                    bottom_fields.iter().map(|f| f.name.clone()).collect();
                Some(translate_predicate(condition, &names)?)
            }
            None => None,
        };

        // Top projection only reorders/renames what the bottom produced
        let (final_fields, renames) = match &parts.top {
            Some(layer) => {
                let resolved =
                    resolve_stacked_projection(layer.exprs, &bottom_fields, layer.row)?;
                (resolved.fields, resolved.renames)
            }
            None => (bottom_fields, Vec::new()),
        };

        // Physical projection in output order. A stacked chain takes the
        // top layer's base positions (the resolved fields carry them); a
        // single layer takes its own indices; no projection means identity.
        // The bottom layer must be physical references either way.
        let projection = match (&parts.bottom, &parts.top) {
            (Some(layer), Some(_)) => {
                simple_indices(layer.exprs)?;
                final_fields.iter().map(|f| f.index).collect()
            }
            (Some(layer), None) => simple_indices(layer.exprs)?,
            (None, _) => catalog.identity_projection(),
        };

        let field_names: Vec<String> = final_fields.iter().map(|f| f.name.clone()).collect();
        let rename_text: Vec<String> = renames
            .iter()
            .map(|(from, to)| format!("{}->{}", from, to))
            .collect();
        Logger::info(
            "PUSHDOWN_MATCH",
            &[
                ("fields", &field_names.join(",")),
                ("predicate", predicate.as_deref().unwrap_or("")),
                ("projection", &format!("{:?}", projection)),
                ("renames", &rename_text.join(",")),
                ("shape", shape.as_str()),
                ("table", parts.table),
            ],
        );

        Some(ScanDescriptor::new(
            parts.table,
            projection,
            predicate,
            shape,
            renames,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldCatalog, FieldType};
    use crate::plan::CallOp;
    use std::collections::HashMap;

    struct TestCatalogs {
        catalogs: HashMap<String, FieldCatalog>,
        plain: Vec<String>,
    }

    impl TestCatalogs {
        fn new() -> Self {
            let mut catalogs = HashMap::new();
            catalogs.insert(
                "users".to_string(),
                FieldCatalog::new([
                    ("Name".to_string(), FieldType::Text),
                    ("Age".to_string(), FieldType::Int),
                    ("Country".to_string(), FieldType::Text),
                ]),
            );
            Self {
                catalogs,
                plain: Vec::new(),
            }
        }

        fn with_plain(mut self, table: &str) -> Self {
            self.plain.push(table.to_string());
            self
        }
    }

    impl CatalogProvider for TestCatalogs {
        fn catalog(&self, table: &str) -> Option<&FieldCatalog> {
            self.catalogs.get(table)
        }

        fn supports_pushdown(&self, table: &str) -> bool {
            self.catalogs.contains_key(table) && !self.plain.iter().any(|t| t == table)
        }
    }

    fn field(name: &str, index: usize, field_type: FieldType) -> Field {
        Field::new(name, index, field_type)
    }

    #[test]
    fn test_filter_on_scan() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::filter(
            Expr::lt(Expr::field(1), Expr::literal(29)),
            OperatorNode::scan("users"),
        );

        let descriptor = matcher.try_match(ChainShape::Filter, &chain).unwrap();
        assert_eq!(descriptor.projection(), &[0, 1, 2]);
        assert_eq!(descriptor.predicate(), Some("Age < 29"));
        assert_eq!(descriptor.shape(), ChainShape::Filter);
    }

    #[test]
    fn test_project_on_scan() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::project(
            vec![Expr::field(2), Expr::field(0)],
            vec![
                field("Country", 0, FieldType::Text),
                field("Name", 1, FieldType::Text),
            ],
            OperatorNode::scan("users"),
        );

        let descriptor = matcher.try_match(ChainShape::Project, &chain).unwrap();
        assert_eq!(descriptor.projection(), &[2, 0]);
        assert!(descriptor.predicate().is_none());
    }

    #[test]
    fn test_filter_on_project_resolves_names_through_bottom() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        // Bottom projection selects [Country, Age]; the filter's $1 is Age
        let chain = OperatorNode::filter(
            Expr::lt(Expr::field(1), Expr::literal(29)),
            OperatorNode::project(
                vec![Expr::field(2), Expr::field(1)],
                vec![
                    field("Country", 0, FieldType::Text),
                    field("Age", 1, FieldType::Int),
                ],
                OperatorNode::scan("users"),
            ),
        );

        let descriptor = matcher.try_match(ChainShape::FilterProject, &chain).unwrap();
        assert_eq!(descriptor.projection(), &[2, 1]);
        assert_eq!(descriptor.predicate(), Some("Age < 29"));
    }

    #[test]
    fn test_full_chain_with_rename() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        // Bottom selects [Name, Age, Country], top reorders to [Age, Name]
        // as [YearsOld, FullName]
        let chain = OperatorNode::project(
            vec![Expr::field(1), Expr::field(0)],
            vec![
                field("YearsOld", 0, FieldType::Int),
                field("FullName", 1, FieldType::Text),
            ],
            OperatorNode::filter(
                Expr::eq(Expr::field(2), Expr::literal("India")),
                OperatorNode::project(
                    vec![Expr::field(0), Expr::field(1), Expr::field(2)],
                    vec![
                        field("Name", 0, FieldType::Text),
                        field("Age", 1, FieldType::Int),
                        field("Country", 2, FieldType::Text),
                    ],
                    OperatorNode::scan("users"),
                ),
            ),
        );

        let descriptor = matcher
            .try_match(ChainShape::ProjectFilterProject, &chain)
            .unwrap();
        // Top order wins: [Age, Name] as base positions
        assert_eq!(descriptor.projection(), &[1, 0]);
        assert_eq!(descriptor.predicate(), Some("Country = India"));
        assert_eq!(
            descriptor.renames(),
            &[
                ("Age".to_string(), "YearsOld".to_string()),
                ("Name".to_string(), "FullName".to_string()),
            ]
        );
    }

    #[test]
    fn test_shape_mismatch_is_silent() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::filter(
            Expr::lt(Expr::field(1), Expr::literal(29)),
            OperatorNode::scan("users"),
        );

        // A Filter->Scan chain is not a FilterProject chain
        assert!(matcher.try_match(ChainShape::FilterProject, &chain).is_none());
        assert!(matcher
            .try_match(ChainShape::ProjectFilterProject, &chain)
            .is_none());
    }

    #[test]
    fn test_untranslatable_filter_aborts() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::filter(
            Expr::eq(Expr::literal(5), Expr::field(1)), // field on the right
            OperatorNode::scan("users"),
        );

        assert!(matcher.try_match(ChainShape::Filter, &chain).is_none());
    }

    #[test]
    fn test_computed_bottom_projection_aborts() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::project(
            vec![Expr::call(
                CallOp::Plus,
                vec![Expr::field(1), Expr::literal(1)],
            )],
            vec![field("AgeNextYear", 0, FieldType::Int)],
            OperatorNode::scan("users"),
        );

        // Cannot express a computed column as physical indices
        assert!(matcher.try_match(ChainShape::Project, &chain).is_none());
    }

    #[test]
    fn test_unknown_table_aborts() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::filter(
            Expr::lt(Expr::field(0), Expr::literal(1)),
            OperatorNode::scan("missing"),
        );

        assert!(matcher.try_match(ChainShape::Filter, &chain).is_none());
    }

    #[test]
    fn test_plain_table_not_pushed() {
        let mut catalogs = TestCatalogs::new();
        catalogs.catalogs.insert(
            "logs".to_string(),
            FieldCatalog::new([("Line".to_string(), FieldType::Text)]),
        );
        let catalogs = catalogs.with_plain("logs");
        let matcher = PushdownMatcher::new(&catalogs);

        let chain = OperatorNode::filter(
            Expr::eq(Expr::field(0), Expr::literal("x")),
            OperatorNode::scan("logs"),
        );

        assert!(matcher.try_match(ChainShape::Filter, &chain).is_none());
    }

    #[test]
    fn test_malformed_filter_condition_aborts() {
        let catalogs = TestCatalogs::new();
        let matcher = PushdownMatcher::new(&catalogs);

        // A bare field reference is not a boolean condition
        let chain = OperatorNode::filter(Expr::field(0), OperatorNode::scan("users"));

        assert!(matcher.try_match(ChainShape::Filter, &chain).is_none());
    }
}
