//! Row type produced by the reader

use indexmap::IndexMap;
use std::ops::Index;

/// One decoded data line
///
/// Named columns are kept apart from the raw split fields and the raw line,
/// so a column can be called anything without clashing with either.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Row {
    /// Header name to whitespace-trimmed value, in header order
    pub columns: IndexMap<String, String>,
    /// Fields as split from the line, untrimmed
    pub raw_fields: Vec<String>,
    /// The line text without its terminator
    pub raw_line: String,
    /// Data line number (1 for the first line after the header)
    pub line_number: u64,
}

impl Row {
    /// Create a new row
    pub fn new(
        columns: IndexMap<String, String>,
        raw_fields: Vec<String>,
        raw_line: String,
        line_number: u64,
    ) -> Self {
        Row {
            columns,
            raw_fields,
            raw_line,
            line_number,
        }
    }

    /// Get value by column name
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Get column name and value by position
    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.columns
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of named columns present in this row
    ///
    /// Can be less than the header length when the line had fewer fields.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the row has no named columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names present in this row, in header order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Untrimmed split fields
    pub fn raw_fields(&self) -> &[String] {
        &self.raw_fields
    }

    /// Line text without terminator
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Data line number
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Take the column map, dropping the raw data
    pub fn into_columns(self) -> IndexMap<String, String> {
        self.columns
    }
}

impl Index<&str> for Row {
    type Output = str;

    /// Panics if the column is absent, like `IndexMap`
    fn index(&self, column: &str) -> &str {
        self.columns[column].as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        let mut columns = IndexMap::new();
        columns.insert("id".to_string(), "1".to_string());
        columns.insert("name".to_string(), "Alice".to_string());
        Row::new(
            columns,
            vec!["1".to_string(), " Alice ".to_string()],
            "1\t Alice ".to_string(),
            1,
        )
    }

    #[test]
    fn test_lookup() {
        let row = sample();
        assert_eq!(row.get("name"), Some("Alice"));
        assert_eq!(row.get("missing"), None);
        assert_eq!(&row["id"], "1");
        assert_eq!(row.get_index(1), Some(("name", "Alice")));
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
    }

    #[test]
    fn test_raw_data_kept_apart() {
        let row = sample();
        assert_eq!(row.raw_fields()[1], " Alice ");
        assert_eq!(row.raw_line(), "1\t Alice ");
        assert_eq!(row.column_names().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(row.line_number(), 1);
    }
}
