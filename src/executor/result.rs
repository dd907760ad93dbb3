//! Query results

use serde_json::Value;

use crate::rows::Row;

/// Columns and rows produced by executing a plan
#[derive(Debug, Clone, PartialEq)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl RowSet {
    /// Creates a result set
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Output column names, in order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the result holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterates over rows
    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// The value at (row, column), if both are in range
    pub fn value(&self, row: usize, column: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_set_accessors() {
        let set = RowSet::new(
            vec!["Name".to_string(), "Age".to_string()],
            vec![
                vec![json!("Abishek"), json!(29)],
                vec![json!("Yuki"), json!(35)],
            ],
        );

        assert_eq!(set.columns(), &["Name", "Age"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert_eq!(set.value(1, 0), Some(&json!("Yuki")));
        assert_eq!(set.value(2, 0), None);
        assert_eq!(set.iter().count(), 2);
    }

    #[test]
    fn test_empty_row_set() {
        let set = RowSet::new(vec!["Name".to_string()], Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
