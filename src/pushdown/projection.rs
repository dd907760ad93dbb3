//! Projection resolution
//!
//! Computes the final ordered field list for zero, one, or two stacked
//! projection layers above a scan, tracking renames across the layers.
//!
//! The bottom layer is permissive: a non-reference expression is adopted
//! positionally from the layer's own declared row type (always safe to
//! read a field, never to reinterpret it). The outer layer is strict: it
//! may only reference positions of the inner layer, so a projection over a
//! computed expression aborts the match.

use crate::catalog::Field;
use crate::plan::Expr;

/// Result of resolving a stacked (outer) projection layer
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProjection {
    /// Final fields in output order; indices still point at the base table
    pub fields: Vec<Field>,
    /// Rename pairs `(inner name, outer name)`, for diagnostics
    pub renames: Vec<(String, String)>,
}

/// Resolves a single projection layer against its input fields
///
/// Field references copy the referenced input field verbatim; any other
/// expression takes the field declared for that output position by the
/// layer's own row type. Returns `None` only on a malformed layer: an
/// out-of-range reference or a declared row shorter than the expression
/// list.
pub fn resolve_projection(
    exprs: &[Expr],
    input_fields: &[Field],
    declared_row: &[Field],
) -> Option<Vec<Field>> {
    let mut resolved = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let field = match expr {
            Expr::FieldRef(index) => input_fields.get(*index)?.clone(),
            _ => declared_row.get(resolved.len())?.clone(),
        };
        resolved.push(field);
    }
    Some(resolved)
}

/// Resolves a second (outer) projection layer over an already-resolved one
///
/// Every expression must be a simple reference into the inner layer. When
/// the referenced inner field's name differs from the name the outer layer
/// declares for that position, a rename pair is recorded and the outer
/// name/type win; the base-table index is kept unchanged.
pub fn resolve_stacked_projection(
    exprs: &[Expr],
    inner_fields: &[Field],
    declared_row: &[Field],
) -> Option<ResolvedProjection> {
    let mut fields = Vec::with_capacity(exprs.len());
    let mut renames = Vec::new();

    for (position, expr) in exprs.iter().enumerate() {
        let index = match expr {
            Expr::FieldRef(index) => *index,
            // Projection over a computed inner expression is unsupported
            _ => return None,
        };
        let inner = inner_fields.get(index)?;
        let declared = declared_row.get(position)?;

        if inner.name != declared.name {
            renames.push((inner.name.clone(), declared.name.clone()));
            fields.push(Field::new(
                declared.name.clone(),
                inner.index,
                declared.field_type,
            ));
        } else {
            fields.push(inner.clone());
        }
    }

    Some(ResolvedProjection { fields, renames })
}

/// Extracts physical column indices from a projection's expressions
///
/// Every expression must be a simple field reference; anything else means
/// the projection cannot be expressed as an index list and the caller must
/// abort the match.
pub fn simple_indices(exprs: &[Expr]) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match expr {
            Expr::FieldRef(index) => indices.push(*index),
            _ => return None,
        }
    }
    Some(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldType;
    use crate::plan::CallOp;

    fn base_fields() -> Vec<Field> {
        vec![
            Field::new("Name", 0, FieldType::Text),
            Field::new("Age", 1, FieldType::Int),
            Field::new("Country", 2, FieldType::Text),
        ]
    }

    #[test]
    fn test_resolve_copies_references_verbatim() {
        let declared = vec![
            Field::new("Name", 0, FieldType::Text),
            Field::new("Age", 1, FieldType::Int),
        ];
        let resolved = resolve_projection(
            &[Expr::field(0), Expr::field(1)],
            &base_fields(),
            &declared,
        )
        .unwrap();

        assert_eq!(resolved, vec![base_fields()[0].clone(), base_fields()[1].clone()]);
    }

    #[test]
    fn test_resolve_adopts_computed_positionally() {
        // A computed column takes the declared field for its position
        let declared = vec![
            Field::new("Name", 0, FieldType::Text),
            Field::new("AgeNextYear", 1, FieldType::Int),
        ];
        let computed = Expr::call(CallOp::Plus, vec![Expr::field(1), Expr::literal(1)]);
        let resolved =
            resolve_projection(&[Expr::field(0), computed], &base_fields(), &declared).unwrap();

        assert_eq!(resolved[1].name, "AgeNextYear");
        assert_eq!(resolved[1].index, 1);
    }

    #[test]
    fn test_resolve_out_of_range_reference_fails() {
        let declared = vec![Field::new("X", 0, FieldType::Int)];
        assert!(resolve_projection(&[Expr::field(9)], &base_fields(), &declared).is_none());
    }

    #[test]
    fn test_stacked_reorder_and_rename() {
        // Bottom selected [Name, Age, Country]; top reorders to [Age, Name]
        // under declared names [YearsOld, FullName]
        let inner = base_fields();
        let declared = vec![
            Field::new("YearsOld", 0, FieldType::Int),
            Field::new("FullName", 1, FieldType::Text),
        ];

        let resolved = resolve_stacked_projection(
            &[Expr::field(1), Expr::field(0)],
            &inner,
            &declared,
        )
        .unwrap();

        assert_eq!(resolved.fields.len(), 2);
        assert_eq!(resolved.fields[0].name, "YearsOld");
        assert_eq!(resolved.fields[0].index, 1); // base-table position kept
        assert_eq!(resolved.fields[1].name, "FullName");
        assert_eq!(resolved.fields[1].index, 0);
        assert_eq!(
            resolved.renames,
            vec![
                ("Age".to_string(), "YearsOld".to_string()),
                ("Name".to_string(), "FullName".to_string()),
            ]
        );
    }

    #[test]
    fn test_stacked_same_names_record_no_renames() {
        let inner = base_fields();
        let declared = vec![
            Field::new("Age", 0, FieldType::Int),
            Field::new("Name", 1, FieldType::Text),
        ];

        let resolved = resolve_stacked_projection(
            &[Expr::field(1), Expr::field(0)],
            &inner,
            &declared,
        )
        .unwrap();

        assert!(resolved.renames.is_empty());
        assert_eq!(resolved.fields[0], inner[1]);
        assert_eq!(resolved.fields[1], inner[0]);
    }

    #[test]
    fn test_stacked_computed_expression_fails() {
        let inner = base_fields();
        let declared = vec![Field::new("X", 0, FieldType::Int)];
        let computed = Expr::call(CallOp::Plus, vec![Expr::field(1), Expr::literal(1)]);

        assert!(resolve_stacked_projection(&[computed], &inner, &declared).is_none());
    }

    #[test]
    fn test_simple_indices() {
        assert_eq!(
            simple_indices(&[Expr::field(2), Expr::field(0)]),
            Some(vec![2, 0])
        );
        assert_eq!(simple_indices(&[]), Some(Vec::new()));
        assert_eq!(
            simple_indices(&[Expr::field(0), Expr::literal(1)]),
            None
        );
    }
}
