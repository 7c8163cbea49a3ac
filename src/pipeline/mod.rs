//! Pipeline entry point and stage orchestration.
//!
//! Control flows strictly downstream: bootstrap the browser, extract the
//! table, validate row structure, write records. The session release wraps
//! every path; a failure at any stage still tears the browser down before the
//! result surfaces.

pub mod extract;
pub mod upload;
pub mod validate;

pub use extract::extract_table;
pub use upload::persist_extraction;
pub use validate::validate_row_lengths;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::storage::{RecordSink, UploadReceipt};

/// Run one complete scrape-validate-upload pipeline against `sink`.
pub async fn run_pipeline(config: &Config, sink: &dyn RecordSink) -> Result<UploadReceipt> {
    let scraped_at = Utc::now();

    info!("Starting browser session");
    let session = BrowserSession::launch(&config.browser).await?;

    let outcome = scrape_and_persist(&session, config, scraped_at, sink).await;

    // Release on success and failure alike; a leaked browser process would
    // outlive the invocation.
    session.close().await;

    outcome
}

async fn scrape_and_persist(
    session: &BrowserSession,
    config: &Config,
    scraped_at: DateTime<Utc>,
    sink: &dyn RecordSink,
) -> Result<UploadReceipt> {
    info!("Extracting data from table");
    let extraction = extract_table(session.browser(), &config.scrape)
        .await
        .map_err(AppError::from)?;

    persist_extraction(&extraction, &config.storage.prefix, scraped_at, sink).await
}
