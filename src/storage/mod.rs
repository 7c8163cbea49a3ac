//! Storage abstractions for record persistence.
//!
//! Output objects land under a time-partitioned key scheme:
//!
//! ```text
//! {prefix}/year=YYYY/month=MM/YYYY-MM-DD_HH-MM-SS_{suffix}.json
//! ```
//!
//! Keys sort lexicographically by creation time within a partition. Two runs
//! in the same second collide; accepted risk, not deduplicated.

pub mod keys;
pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Record;

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;

/// Metadata about a completed sink write.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    /// Where the object landed (`s3://bucket/key` or a filesystem path)
    pub location: String,

    /// Number of records in the object
    pub record_count: usize,

    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for record storage backends.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Serialize `records` as a JSON array and write them under `key`.
    async fn put_records(&self, key: &str, records: &[Record]) -> Result<UploadReceipt>;
}
