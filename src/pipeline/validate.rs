// src/pipeline/validate.rs

//! Structural validation of extracted table data.

/// Check that every row has exactly as many cells as the header has columns.
///
/// Pure function. An empty row set trivially validates; callers reject empty
/// extractions before relying on this.
pub fn validate_row_lengths(header: &[String], rows: &[Vec<String>]) -> bool {
    rows.iter().all(|row| row.len() == header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matching_lengths_validate() {
        let header = strings(&["rank", "city"]);
        let rows = vec![strings(&["1", "X"]), strings(&["2", "Y"])];
        assert!(validate_row_lengths(&header, &rows));
    }

    #[test]
    fn test_short_row_fails() {
        let header = strings(&["rank", "city"]);
        let rows = vec![strings(&["1", "X"]), strings(&["2"])];
        assert!(!validate_row_lengths(&header, &rows));
    }

    #[test]
    fn test_long_row_fails() {
        let header = strings(&["rank"]);
        let rows = vec![strings(&["1", "extra"])];
        assert!(!validate_row_lengths(&header, &rows));
    }

    #[test]
    fn test_empty_rows_trivially_validate() {
        let header = strings(&["rank", "city"]);
        assert!(validate_row_lengths(&header, &[]));
    }
}
