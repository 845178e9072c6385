//! race-harvest: a polite scraper for yearly race results
//!
//! This crate walks the paged race index of a results site one year at a
//! time, extracts every race detail page into a typed [`extract::Race`]
//! record and appends the records to one JSON array file per year.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod logging;
pub mod output;

use thiserror::Error;

/// Main error type for race-harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarvestError {
    /// Returns true if the error only concerns a single record
    ///
    /// Record-scoped errors are logged and skipped by the harvester; every
    /// other kind aborts the crawl.
    pub fn is_record_scoped(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Extraction(_))
    }
}

/// Failure to obtain a page body
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failure to turn a fetched page into a record
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Malformed field {field}: {value:?}")]
    Malformed { field: String, value: String },

    #[error("Invalid pattern: {0}")]
    Pattern(String),
}

impl ExtractionError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Harvester, Paginator};
pub use extract::{NetkeibaExtractor, Race, RecordExtractor};
pub use output::{CrawlStatistics, YearStatistics};
