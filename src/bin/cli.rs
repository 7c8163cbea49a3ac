//! popscraper CLI
//!
//! Local execution entry point. For AWS Lambda, use `popscraper-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use popscraper::{
    browser::BrowserSession,
    config::Config,
    error::Result,
    pipeline,
    storage::{LocalStorage, UploadReceipt},
};

/// popscraper - City Population Table Scraper
#[derive(Parser, Debug)]
#[command(
    name = "popscraper",
    version,
    about = "Scrapes a city population ranking table into a data lake landing zone"
)]
struct Cli {
    /// Path to a TOML config file (environment variables win where both are set)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the full scrape-validate-upload pipeline
    Run {
        /// Write records under this directory instead of S3
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Scrape only and print the extraction as JSON (no upload)
    Extract,

    /// Validate configuration values
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let loaded = Config::load(path)?;
            tracing::info!("Loaded configuration from {}", path.display());
            loaded
        }
        None => Config::default(),
    };
    let config = config.with_env_overrides(|key| std::env::var(key).ok())?;

    match cli.command {
        Command::Run { out_dir } => {
            config.validate()?;

            let receipt = match out_dir {
                Some(dir) => {
                    tracing::info!("Writing records under {}", dir.display());
                    let sink = LocalStorage::new(dir);
                    pipeline::run_pipeline(&config, &sink).await?
                }
                None => run_against_s3(&config).await?,
            };

            tracing::info!(
                "Run complete: {} records at {}",
                receipt.record_count,
                receipt.location
            );
        }

        Command::Extract => {
            config.validate()?;

            let session = BrowserSession::launch(&config.browser).await?;
            let result = pipeline::extract_table(session.browser(), &config.scrape).await;
            session.close().await;

            let extraction = result?;
            println!("{}", serde_json::to_string_pretty(&extraction)?);
        }

        Command::Validate => {
            config.validate()?;
            tracing::info!("Configuration OK");
            tracing::info!("  data_url: {}", config.scrape.data_url);
            tracing::info!("  table_selector: {}", config.scrape.table_selector);
            tracing::info!("  max_rows: {}", config.scrape.max_rows);
            tracing::info!("  wait_timeout_secs: {}", config.scrape.wait_timeout_secs);
            tracing::info!(
                "  bucket: {}",
                if config.storage.bucket.is_empty() {
                    "(unset)"
                } else {
                    config.storage.bucket.as_str()
                }
            );
            tracing::info!("  prefix: {}", config.storage.prefix);
            tracing::info!(
                "  launch variant: {}",
                if config.browser.local {
                    "local"
                } else {
                    "packaged"
                }
            );
        }
    }

    Ok(())
}

#[cfg(feature = "s3")]
async fn run_against_s3(config: &Config) -> Result<UploadReceipt> {
    let sink = popscraper::storage::S3Storage::from_config(&config.storage).await?;
    pipeline::run_pipeline(config, &sink).await
}

#[cfg(not(feature = "s3"))]
async fn run_against_s3(_config: &Config) -> Result<UploadReceipt> {
    Err(popscraper::error::AppError::config(
        "built without the 's3' feature; pass --out-dir for a local run",
    ))
}
