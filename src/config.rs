// src/config.rs

//! Application configuration.
//!
//! In Lambda the environment is the only configuration channel; the CLI can
//! additionally load a TOML file, with environment values winning where both
//! are set.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Object store destination
    #[serde(default)]
    pub storage: StorageConfig,

    /// Page extraction settings
    #[serde(default)]
    pub scrape: ScrapeConfig,

    /// Browser launch settings
    #[serde(default)]
    pub browser: BrowserConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Build configuration from process environment variables only.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    /// Apply environment-style overrides on top of the current values.
    ///
    /// `lookup` abstracts `std::env::var` so override resolution is testable
    /// without mutating process state.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(bucket) = lookup("S3_BUCKET") {
            self.storage.bucket = bucket;
        }
        if let Some(prefix) = lookup("S3_PATH") {
            self.storage.prefix = prefix;
        }
        if let Some(url) = lookup("DATA_URL") {
            self.scrape.data_url = url;
        }
        if let Some(selector) = lookup("TABLE_SELECTOR") {
            self.scrape.table_selector = selector;
        }
        if let Some(raw) = lookup("MAX_ROWS") {
            self.scrape.max_rows = raw
                .parse()
                .map_err(|e| AppError::config(format!("MAX_ROWS is not a number: {e}")))?;
        }
        if let Some(raw) = lookup("WAIT_TIMEOUT_SECS") {
            self.scrape.wait_timeout_secs = raw
                .parse()
                .map_err(|e| AppError::config(format!("WAIT_TIMEOUT_SECS is not a number: {e}")))?;
        }
        if let Some(binary) = lookup("CHROME_BINARY") {
            if !binary.is_empty() {
                self.browser.binary = Some(PathBuf::from(binary));
            }
        }
        if let Some(local) = lookup("LOCAL") {
            self.browser.local = is_truthy(&local);
        }
        Ok(self)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.scrape.data_url.trim().is_empty() {
            return Err(AppError::validation("scrape.data_url is empty"));
        }
        url::Url::parse(&self.scrape.data_url)?;
        if scraper::Selector::parse(&self.scrape.table_selector).is_err() {
            return Err(AppError::validation(format!(
                "scrape.table_selector '{}' does not parse",
                self.scrape.table_selector
            )));
        }
        if self.scrape.max_rows == 0 {
            return Err(AppError::validation("scrape.max_rows must be > 0"));
        }
        if self.scrape.wait_timeout_secs == 0 {
            return Err(AppError::validation("scrape.wait_timeout_secs must be > 0"));
        }
        Ok(())
    }
}

/// Object store destination settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Destination bucket name (required for S3 sinks)
    #[serde(default)]
    pub bucket: String,

    /// Destination key prefix
    #[serde(default)]
    pub prefix: String,
}

/// Page extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Page to scrape
    #[serde(default)]
    pub data_url: String,

    /// CSS selector of the target table
    #[serde(default = "defaults::table_selector")]
    pub table_selector: String,

    /// Row extraction cap
    #[serde(default = "defaults::max_rows")]
    pub max_rows: usize,

    /// Seconds to wait for the table to render
    #[serde(default = "defaults::wait_timeout")]
    pub wait_timeout_secs: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            data_url: String::new(),
            table_selector: defaults::table_selector(),
            max_rows: defaults::max_rows(),
            wait_timeout_secs: defaults::wait_timeout(),
        }
    }
}

/// Browser launch settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Browser binary path; resolved from PATH when unset
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Use the local (developer machine) launch variant
    #[serde(default)]
    pub local: bool,
}

/// Parse a boolean-like environment toggle.
fn is_truthy(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "" | "0" | "false" | "no")
}

mod defaults {
    pub fn table_selector() -> String {
        "table.wpr-table".to_string()
    }

    pub fn max_rows() -> usize {
        100
    }

    pub fn wait_timeout() -> u64 {
        10
    }
}
