//! Row materialization
//!
//! A row is an ordered list of column values matching a projection. Values
//! are extracted from JSON records through the catalog's typed fields.

use serde_json::Value;

use crate::catalog::{Field, FieldCatalog, FieldType};
use crate::observability::Logger;

/// One materialized row
pub type Row = Vec<Value>;

/// Physical access to a table's records
///
/// The predicate parameter is advisory: the source is expected to apply
/// it, but a source that cannot is still a valid source.
pub trait RowSource {
    /// Fetches rows for a projection of base-table column indices
    fn fetch(&self, projection: &[usize], predicate: Option<&str>) -> Vec<Row>;
}

/// Extracts one typed column value from a record
///
/// Returns `None` when the column is missing or the value does not match
/// the catalog's declared type.
pub fn extract_value(record: &Value, field: &Field) -> Option<Value> {
    let value = record.get(&field.name)?;
    let eligible = match field.field_type {
        FieldType::Int => matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()),
        FieldType::Float => matches!(value, Value::Number(_)),
        FieldType::Text | FieldType::Date => matches!(value, Value::String(_)),
    };
    if eligible {
        Some(value.clone())
    } else {
        None
    }
}

/// Materializes one record into a projected row
///
/// A failed extraction is logged and skipped: the record contributes a
/// shorter row rather than failing the whole fetch.
pub fn materialize_row(record: &Value, catalog: &FieldCatalog, projection: &[usize]) -> Row {
    let mut row = Vec::with_capacity(projection.len());
    for &index in projection {
        let field = match catalog.field(index) {
            Some(f) => f,
            None => {
                Logger::warn(
                    "ROW_ACCESS_FAILED",
                    &[("column_index", &index.to_string()), ("reason", "no such column")],
                );
                continue;
            }
        };
        match extract_value(record, field) {
            Some(value) => row.push(value),
            None => {
                Logger::warn(
                    "ROW_ACCESS_FAILED",
                    &[("column", &field.name), ("reason", "missing or mistyped value")],
                );
            }
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::inspect_record;
    use serde_json::json;

    fn sample_catalog() -> FieldCatalog {
        inspect_record(&json!({"Age": 29, "Country": "India", "Name": "Abishek"}))
    }

    #[test]
    fn test_materialize_full_row() {
        let catalog = sample_catalog();
        let record = json!({"Age": 29, "Country": "India", "Name": "Abishek"});

        let row = materialize_row(&record, &catalog, &catalog.identity_projection());
        assert_eq!(row, vec![json!(29), json!("India"), json!("Abishek")]);
    }

    #[test]
    fn test_materialize_projected_row() {
        let catalog = sample_catalog();
        let record = json!({"Age": 29, "Country": "India", "Name": "Abishek"});

        // Name, Age
        let row = materialize_row(&record, &catalog, &[2, 0]);
        assert_eq!(row, vec![json!("Abishek"), json!(29)]);
    }

    #[test]
    fn test_missing_value_yields_shorter_row() {
        let catalog = sample_catalog();
        let record = json!({"Age": 31, "Name": "Priya"}); // no Country

        let row = materialize_row(&record, &catalog, &catalog.identity_projection());
        assert_eq!(row, vec![json!(31), json!("Priya")]);
    }

    #[test]
    fn test_mistyped_value_yields_shorter_row() {
        let catalog = sample_catalog();
        let record = json!({"Age": "not a number", "Country": "India", "Name": "X"});

        let row = materialize_row(&record, &catalog, &catalog.identity_projection());
        assert_eq!(row.len(), 2);
    }

    #[test]
    fn test_extract_respects_declared_type() {
        let catalog = sample_catalog();
        let age = catalog.field_named("Age").unwrap();
        assert_eq!(extract_value(&json!({"Age": 29}), age), Some(json!(29)));
        assert_eq!(extract_value(&json!({"Age": 2.5}), age), None);
        assert_eq!(extract_value(&json!({}), age), None);
    }

    #[test]
    fn test_out_of_range_projection_index_skipped() {
        let catalog = sample_catalog();
        let record = json!({"Age": 29, "Country": "India", "Name": "Abishek"});

        let row = materialize_row(&record, &catalog, &[0, 99]);
        assert_eq!(row, vec![json!(29)]);
    }
}
