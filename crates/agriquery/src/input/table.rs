//! Cells as read from a payload, before normalization.

/// Headers and string cells of one dataset payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column headers, exactly as they appeared in the source.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a new raw table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Check if a value represents a missing/null value.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed == "."
            || trimmed == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null_value() {
        assert!(RawTable::is_null_value(""));
        assert!(RawTable::is_null_value("  "));
        assert!(RawTable::is_null_value("NA"));
        assert!(RawTable::is_null_value("NaN"));
        assert!(RawTable::is_null_value("null"));
        assert!(RawTable::is_null_value("-"));
        assert!(!RawTable::is_null_value("0"));
        assert!(!RawTable::is_null_value("rice"));
    }

    #[test]
    fn test_get_out_of_range() {
        let table = RawTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
        );
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 1), Some("2"));
        assert_eq!(table.get(2, 0), None);
        assert_eq!(table.get(1, 1), None);
    }
}
