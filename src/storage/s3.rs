//! AWS S3 record storage.
//!
//! One `PutObject` per run under the partitioned key scheme, body JSON,
//! content type `application/json`. Write failures propagate to the caller;
//! the run either fully succeeds or produces zero output.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use tracing::info;

use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::Record;
use crate::storage::{RecordSink, UploadReceipt};

/// S3-backed record storage.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Create S3 storage from application configuration, using the default
    /// AWS credential and region chain.
    pub async fn from_config(storage: &StorageConfig) -> Result<Self> {
        if storage.bucket.trim().is_empty() {
            return Err(AppError::config("S3_BUCKET is not set"));
        }

        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);
        Ok(Self::new(client, storage.bucket.clone()))
    }
}

#[async_trait]
impl RecordSink for S3Storage {
    async fn put_records(&self, key: &str, records: &[Record]) -> Result<UploadReceipt> {
        let json = serde_json::to_string(records)?;
        let bytes = ByteStream::from(json.into_bytes());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(bytes)
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| AppError::s3(e.into_service_error()))?;

        info!(
            "Wrote {} records to s3://{}/{}",
            records.len(),
            self.bucket,
            key
        );
        Ok(UploadReceipt {
            location: format!("s3://{}/{}", self.bucket, key),
            record_count: records.len(),
            timestamp: Utc::now(),
        })
    }
}
