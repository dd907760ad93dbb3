//! Record inspection
//!
//! Derives a table's catalog from a sample record. Only eligible value
//! kinds become columns; everything else is skipped.
//!
//! Eligibility:
//! - integer number -> Int
//! - non-integer number -> Float
//! - RFC 3339 string -> Date
//! - any other string -> Text
//! - null / bool / array / object -> ineligible
//!
//! Key order is serde_json's map order, which is sorted and therefore
//! deterministic for a given record.

use chrono::DateTime;
use serde_json::Value;

use super::field::{FieldCatalog, FieldType};

/// Builds a catalog from a sample record
///
/// A non-object record (or an object with no eligible values) yields an
/// empty catalog.
pub fn inspect_record(record: &Value) -> FieldCatalog {
    let object = match record {
        Value::Object(map) => map,
        _ => return FieldCatalog::empty(),
    };

    let fields = object
        .iter()
        .filter_map(|(name, value)| eligible_type(value).map(|t| (name.clone(), t)));

    FieldCatalog::new(fields)
}

/// Determines the column type for a sample value, if eligible
fn eligible_type(value: &Value) -> Option<FieldType> {
    match value {
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                Some(FieldType::Int)
            } else {
                Some(FieldType::Float)
            }
        }
        Value::String(s) => {
            if DateTime::parse_from_rfc3339(s).is_ok() {
                Some(FieldType::Date)
            } else {
                Some(FieldType::Text)
            }
        }
        _ => None,
    }
}
