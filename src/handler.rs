// src/handler.rs

//! AWS Lambda handler for the scraper.

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::models::RunOutcome;
use crate::pipeline::run_pipeline;
use crate::storage::UploadReceipt;
use crate::storage::s3::S3Storage;

/// Main Lambda handler function.
///
/// The event payload carries no inputs; it is logged for trace correlation
/// only. Pipeline failures map to a 500-style [`RunOutcome`], never to a
/// transport-level error — the scheduler retries whole runs on future ticks,
/// not mid-run.
#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Value>) -> std::result::Result<Value, LambdaError> {
    info!("Handling event: {:?}", event.payload);

    let outcome = match run_lambda_pipeline().await {
        Ok(receipt) => {
            info!("Upload to S3 successful: {}", receipt.location);
            RunOutcome::success("Scraping and upload completed")
        }
        Err(e) => {
            error!("Run failed: {e}");
            RunOutcome::failure(e)
        }
    };

    Ok(outcome.into_response())
}

/// Internal pipeline logic for the Lambda environment.
async fn run_lambda_pipeline() -> Result<UploadReceipt> {
    let config = Config::from_env()?;
    config.validate()?;

    let sink = S3Storage::from_config(&config.storage).await?;
    run_pipeline(&config, &sink).await
}
