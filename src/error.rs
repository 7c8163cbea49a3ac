// src/error.rs

//! Unified error handling for the scraper application.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Browser process could not be started or driven
    #[error("browser error: {0}")]
    Browser(String),

    /// Table extraction failed
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// AWS S3 error
    #[error("S3 error: {0}")]
    S3(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a browser error.
    pub fn browser(message: impl fmt::Display) -> Self {
        Self::Browser(message.to_string())
    }

    /// Create an S3 error.
    pub fn s3(message: impl fmt::Display) -> Self {
        Self::S3(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Tagged extraction failure taxonomy.
///
/// Each variant names a distinct way the table scrape can fail, so callers and
/// tests can tell a scraping break from a legitimately empty page without
/// re-scraping. All variants are fatal to the run; none are retried in-process.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The table never appeared within the readiness wait.
    #[error("timed out after {waited:?} waiting for '{selector}'")]
    Timeout { selector: String, waited: Duration },

    /// The page rendered, but no element matched the table selector.
    #[error("table '{selector}' not found on page")]
    TableNotFound { selector: String },

    /// The table was present during the wait but gone from the HTML snapshot.
    #[error("table went stale between readiness wait and extraction")]
    Stale,

    /// The table has no header cells.
    #[error("table has no header cells")]
    EmptyHeader,

    /// The table has a header but no data rows.
    #[error("table has no data rows")]
    NoRows,

    /// The configured CSS selector does not parse.
    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Browser protocol or transport failure.
    #[error("browser protocol error: {0}")]
    Cdp(String),
}

impl ScrapeError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a protocol error.
    pub fn cdp(message: impl fmt::Display) -> Self {
        Self::Cdp(message.to_string())
    }
}
