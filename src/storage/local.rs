//! Filesystem record storage for local development runs.
//!
//! Mirrors the object-store key scheme under a root directory so a CLI run
//! produces the same layout a Lambda run would put in the bucket.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::models::Record;
use crate::storage::{RecordSink, UploadReceipt};

/// Record storage rooted at a local directory.
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a local storage instance rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl RecordSink for LocalStorage {
    async fn put_records(&self, key: &str, records: &[Record]) -> Result<UploadReceipt> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string(records)?;
        tokio::fs::write(&path, json.as_bytes()).await?;

        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(UploadReceipt {
            location: path.display().to_string(),
            record_count: records.len(),
            timestamp: Utc::now(),
        })
    }
}
