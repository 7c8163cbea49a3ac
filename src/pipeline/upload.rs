// src/pipeline/upload.rs

//! Object writer stage.
//!
//! Turns a validated extraction into one JSON record per row and writes the
//! record list under a time-partitioned key through a [`RecordSink`]. One
//! write per run; no read-modify-write, no overwrite protection beyond the
//! timestamp in the key.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::{Extraction, build_records};
use crate::pipeline::validate::validate_row_lengths;
use crate::storage::{RecordSink, UploadReceipt, keys};

/// Semantic suffix of the output object.
pub const RECORD_SUFFIX: &str = "population_ranks";

/// Validate the extraction and write its records to the sink.
///
/// Short-circuits before touching the sink when the extraction is empty or a
/// row's length disagrees with the header.
pub async fn persist_extraction(
    extraction: &Extraction,
    prefix: &str,
    scraped_at: DateTime<Utc>,
    sink: &dyn RecordSink,
) -> Result<UploadReceipt> {
    if extraction.is_empty() {
        return Err(AppError::validation(
            "extraction produced no header or no rows",
        ));
    }
    if !validate_row_lengths(&extraction.header, &extraction.rows) {
        return Err(AppError::validation(
            "row length does not match header length",
        ));
    }

    let records = build_records(&extraction.header, &extraction.rows);
    let key = keys::object_key(prefix, scraped_at, RECORD_SUFFIX, "json");

    let receipt = sink.put_records(&key, &records).await?;
    info!(
        "Wrote {} records to {}",
        receipt.record_count, receipt.location
    );
    Ok(receipt)
}
