//! Output module for harvested records
//!
//! This module handles:
//! - Writing one incremental JSON array file per year
//! - Recording and printing harvest statistics

mod json_array;
pub mod stats;

pub use json_array::JsonArrayWriter;
pub use stats::{format_statistics, print_statistics, CrawlStatistics, YearStatistics};
