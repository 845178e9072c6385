//! Logging setup
//!
//! Two sinks, built explicitly at startup:
//! - the console, filtered by the verbosity flags
//! - a file named after the crawl start time, `WARN` and above only
//!
//! Every skipped record is logged at `WARN`, so the file is the failure
//! report of a crawl.

use chrono::{DateTime, Local};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Where and how much to log
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Directory receiving the timestamped log file
    pub directory: PathBuf,

    /// Console verbosity (-v, -vv, -vvv)
    pub verbose: u8,

    /// Console shows errors only
    pub quiet: bool,
}

/// Console filter for the given verbosity
pub fn console_filter(verbose: u8, quiet: bool) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }

    match verbose {
        0 => EnvFilter::new("race_harvest=info,warn"),
        1 => EnvFilter::new("race_harvest=debug,info"),
        2 => EnvFilter::new("race_harvest=trace,debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// `{directory}/{YYYY-MM-DD_HH-MM-SS}.log`
pub fn log_file_path(directory: &Path, started_at: DateTime<Local>) -> PathBuf {
    directory.join(format!("{}.log", started_at.format("%Y-%m-%d_%H-%M-%S")))
}

/// Builds the subscriber and creates its log file
///
/// The caller decides how to install it: globally from `main`, or scoped
/// with `tracing::subscriber::set_default` in tests.
///
/// # Returns
///
/// The subscriber and the path of the file sink.
pub fn build(
    options: &LogOptions,
    started_at: DateTime<Local>,
) -> io::Result<(impl Subscriber + Send + Sync + 'static, PathBuf)> {
    fs::create_dir_all(&options.directory)?;
    let path = log_file_path(&options.directory, started_at);
    let file = File::create(&path)?;

    let console = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_filter(console_filter(options.verbose, options.quiet));

    let file_sink = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .with_filter(LevelFilter::WARN);

    let subscriber = tracing_subscriber::registry().with(console).with(file_sink);

    Ok((subscriber, path))
}
