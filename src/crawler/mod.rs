//! Crawler module for page fetching and harvest orchestration
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching
//! - Fixed-delay request pacing
//! - Walking the paged race index
//! - Per-year harvest coordination

mod fetcher;
mod harvester;
mod paginator;
mod throttle;

pub use fetcher::{build_http_client, Fetcher};
pub use harvester::Harvester;
pub use paginator::{index_url, parse_index_page, IndexPage, Paginator};
pub use throttle::Throttle;

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::HarvestError;

/// Runs a complete harvest operation
///
/// This is the main entry point for starting a harvest. For each year in
/// the configured range it will:
/// 1. Open the year's output file
/// 2. Walk the paged index
/// 3. Fetch and extract every detail page
/// 4. Append records, skipping failed ones
/// 5. Close the output file
///
/// # Arguments
///
/// * `config` - The harvester configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Harvest completed
/// * `Err(HarvestError)` - Output could not be written
///
/// # Example
///
/// ```no_run
/// use race_harvest::config::load_config;
/// use race_harvest::crawler::harvest;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let stats = harvest(config).await?;
/// println!("{} records", stats.total_written());
/// # Ok(())
/// # }
/// ```
pub async fn harvest(config: Config) -> Result<CrawlStatistics, HarvestError> {
    Harvester::new(config)?.run().await
}
