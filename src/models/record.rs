//! Record construction from validated table data.

use serde_json::{Map, Value};

/// One output record: column name to cell value, in header order.
pub type Record = Map<String, Value>;

/// Build one record per row by pairing header entries positionally with row
/// cell values.
///
/// A duplicate header name overwrites the earlier value for that key. Rows are
/// expected to be length-validated before this is called; a short row simply
/// yields a record with fewer fields.
pub fn build_records(header: &[String], rows: &[Vec<String>]) -> Vec<Record> {
    rows.iter()
        .map(|row| {
            header
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), Value::String(cell.clone())))
                .collect()
        })
        .collect()
}
