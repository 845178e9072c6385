use super::validation::validate;
use crate::ConfigError;
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure for race-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Narrows the crawl to a single year and revalidates
    pub fn restrict_to_year(&mut self, year: i32) -> Result<(), ConfigError> {
        self.crawler.start_year = year;
        self.crawler.end_year = year;
        validate(self)
    }
}

/// The site being harvested
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Site root; relative links on index pages are resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// First year to harvest
    #[serde(rename = "start-year")]
    pub start_year: i32,

    /// Last year to harvest (inclusive)
    #[serde(rename = "end-year")]
    pub end_year: i32,

    /// Fixed delay between successive requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

impl CrawlerConfig {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one `{year}.json` file per harvested year
    #[serde(rename = "race-directory")]
    pub race_directory: String,

    /// Directory receiving the timestamped warning log
    #[serde(rename = "log-directory")]
    pub log_directory: String,
}

impl OutputConfig {
    /// Path of the JSON array file for `year`
    pub fn year_path(&self, year: i32) -> PathBuf {
        Path::new(&self.race_directory).join(format!("{year}.json"))
    }
}
