//! race-harvest main entry point
//!
//! This is the command-line interface for the race result harvester.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use race_harvest::config::{load_config_with_hash, Config};
use race_harvest::crawler::{harvest, index_url};
use race_harvest::logging::{self, LogOptions};
use race_harvest::output::print_statistics;
use std::path::PathBuf;
use url::Url;

/// race-harvest: yearly race results, one JSON array per year
///
/// Walks the paged race index of every configured year, extracts each race
/// detail page and appends the records to `{race-directory}/{year}.json`.
/// Pages that fail to fetch or extract are logged and skipped.
#[derive(Parser, Debug)]
#[command(name = "race-harvest")]
#[command(version)]
#[command(about = "Harvest yearly race results", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error console output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Harvest only this year instead of the configured range
    #[arg(long, value_name = "YEAR")]
    year: Option<i32>,

    /// Validate config and show what would be harvested without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let started_at = Local::now();

    let (mut config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;

    if let Some(year) = cli.year {
        config
            .restrict_to_year(year)
            .with_context(|| format!("Invalid --year {}", year))?;
    }

    if cli.dry_run {
        return handle_dry_run(&config);
    }

    let options = LogOptions {
        directory: PathBuf::from(&config.output.log_directory),
        verbose: cli.verbose,
        quiet: cli.quiet,
    };
    let (subscriber, log_path) =
        logging::build(&options, started_at).context("Failed to create log file")?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install logging")?;

    tracing::info!(
        "Configuration loaded from {} (hash: {})",
        cli.config.display(),
        config_hash
    );
    tracing::info!("Warnings are recorded in {}", log_path.display());

    handle_harvest(config).await
}

/// Handles the --dry-run mode: shows the resolved harvest plan
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let base_url = Url::parse(&config.site.base_url)?;

    println!("=== race-harvest Dry Run ===\n");

    println!("Site: {}", config.site.base_url);
    println!(
        "Request delay: {}ms, timeout: {}s",
        config.crawler.request_delay_ms, config.crawler.timeout_secs
    );
    println!("User agent: {}", config.user_agent.header_value());
    println!("Log directory: {}", config.output.log_directory);

    println!("\nYears:");
    for year in config.crawler.years() {
        println!("  - {} -> {}", year, config.output.year_path(year).display());
        println!("    * {}", index_url(&base_url, year));
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Harvesting {}..={} from {}",
        config.crawler.start_year,
        config.crawler.end_year,
        config.site.base_url
    );

    match harvest(config).await {
        Ok(stats) => {
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest aborted: {}", e);
            Err(e.into())
        }
    }
}
