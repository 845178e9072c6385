//! Harvest driver - per-year crawl orchestration
//!
//! For every configured year the harvester:
//! 1. Opens the year's JSON array file
//! 2. Pulls detail URLs from the [`Paginator`]
//! 3. Fetches and extracts each record, one request at a time
//! 4. Appends successful records, logs and skips failed ones
//! 5. Closes the array once the index is exhausted

use super::{build_http_client, Fetcher, Paginator, Throttle};
use crate::config::Config;
use crate::extract::{NetkeibaExtractor, Race, RecordExtractor};
use crate::output::{CrawlStatistics, JsonArrayWriter, YearStatistics};
use crate::HarvestError;
use std::time::Instant;

/// Main harvest driver
pub struct Harvester<E = NetkeibaExtractor> {
    config: Config,
    fetcher: Fetcher,
    extractor: E,
}

impl Harvester<NetkeibaExtractor> {
    /// Creates a harvester for the site layout it was written against
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let extractor = NetkeibaExtractor::new()?;
        Self::with_extractor(config, extractor)
    }
}

impl<E: RecordExtractor> Harvester<E> {
    /// Creates a harvester using a custom record extractor
    pub fn with_extractor(config: Config, extractor: E) -> Result<Self, HarvestError> {
        let client = build_http_client(&config.user_agent, config.crawler.timeout())?;

        Ok(Self {
            config,
            fetcher: Fetcher::new(client),
            extractor,
        })
    }

    /// Harvests every configured year in order
    ///
    /// Only output failures abort the crawl; they leave the current year's
    /// file unterminated.
    pub async fn run(&self) -> Result<CrawlStatistics, HarvestError> {
        let start_time = Instant::now();
        let mut stats = CrawlStatistics::default();

        for year in self.config.crawler.years() {
            stats.years.push(self.harvest_year(year).await?);
        }

        stats.elapsed = start_time.elapsed();
        tracing::info!(
            "Harvest completed: {} records written, {} failed in {:?}",
            stats.total_written(),
            stats.total_failed(),
            stats.elapsed
        );

        Ok(stats)
    }

    /// Harvests one year into `{race-directory}/{year}.json`
    pub async fn harvest_year(&self, year: i32) -> Result<YearStatistics, HarvestError> {
        let output_path = self.config.output.year_path(year);
        let mut stats = YearStatistics::new(year, output_path.clone());

        tracing::info!("Harvesting {} into {}", year, output_path.display());
        let mut writer = JsonArrayWriter::create(&output_path)?;

        let mut paginator = Paginator::new(
            self.fetcher.clone(),
            &self.config.site.base_url,
            year,
            self.config.crawler.request_delay(),
        )?;
        let mut throttle = Throttle::new(self.config.crawler.request_delay());
        let mut index = 0usize;

        loop {
            let url = match paginator.next().await {
                Ok(Some(url)) => url,
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Index walk for {} stopped: {}", year, e);
                    stats.index_failed = true;
                    break;
                }
            };

            throttle.wait().await;

            match self.harvest_record(&url).await {
                Ok(race) => {
                    writer.append(&race)?;
                    stats.written += 1;
                    tracing::info!("{} success: {}", index, race.race_name);
                }
                Err(e) if e.is_record_scoped() => {
                    stats.failed += 1;
                    tracing::warn!("{} failure: {} ({})", index, url, e);
                }
                Err(e) => return Err(e),
            }

            index += 1;
        }

        writer.finish()?;

        stats.skipped_links = paginator.skipped();
        stats.index_pages = paginator.pages_fetched();
        tracing::info!(
            "Finished {}: {} written, {} failed, {} links skipped",
            year,
            stats.written,
            stats.failed,
            stats.skipped_links
        );

        Ok(stats)
    }

    /// Fetches and extracts a single record
    async fn harvest_record(&self, url: &str) -> Result<Race, HarvestError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(self.extractor.extract(url, &html)?)
    }
}
