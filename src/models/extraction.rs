//! Extracted table data.

use serde::{Deserialize, Serialize};

/// Header and row cell text extracted from the target table.
///
/// Only produced on a successful extraction; failures are reported as
/// `ScrapeError`, never as an empty pair. Consumed once by the validation and
/// upload stages, not persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Extraction {
    /// Column names in document order
    pub header: Vec<String>,

    /// Row cell text in document order, capped at the configured row limit
    pub rows: Vec<Vec<String>>,
}

impl Extraction {
    /// Number of extracted rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the header or the row set is empty.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() || self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty() {
        assert!(Extraction::default().is_empty());

        let header_only = Extraction {
            header: vec!["rank".to_string()],
            rows: vec![],
        };
        assert!(header_only.is_empty());

        let rows_only = Extraction {
            header: vec![],
            rows: vec![vec!["1".to_string()]],
        };
        assert!(rows_only.is_empty());

        let full = Extraction {
            header: vec!["rank".to_string()],
            rows: vec![vec!["1".to_string()]],
        };
        assert!(!full.is_empty());
        assert_eq!(full.row_count(), 1);
    }
}
