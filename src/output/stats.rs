//! Harvest statistics
//!
//! Counters gathered while harvesting, printed once the crawl is over.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of harvesting one year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearStatistics {
    pub year: i32,

    /// The year's JSON array file
    pub output_path: PathBuf,

    /// Records appended to the output
    pub written: usize,

    /// Records that failed to fetch or extract
    pub failed: usize,

    /// Index links rejected by the paginator
    pub skipped_links: usize,

    /// Index pages fetched
    pub index_pages: usize,

    /// Whether the index walk ended on a fetch failure
    pub index_failed: bool,
}

impl YearStatistics {
    pub fn new(year: i32, output_path: PathBuf) -> Self {
        Self {
            year,
            output_path,
            written: 0,
            failed: 0,
            skipped_links: 0,
            index_pages: 0,
            index_failed: false,
        }
    }

    /// Detail links attempted
    pub fn attempted(&self) -> usize {
        self.written + self.failed
    }
}

/// Outcome of a whole crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlStatistics {
    pub years: Vec<YearStatistics>,
    pub elapsed: Duration,
}

impl CrawlStatistics {
    pub fn total_written(&self) -> usize {
        self.years.iter().map(|y| y.written).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.years.iter().map(|y| y.failed).sum()
    }
}

/// Formats statistics as a plain-text table
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    out.push_str("=== Harvest Statistics ===\n\n");
    out.push_str(&format!(
        "{:<6} {:>8} {:>8} {:>8} {:>6}  {}\n",
        "Year", "Written", "Failed", "Skipped", "Pages", "Output"
    ));

    for year in &stats.years {
        out.push_str(&format!(
            "{:<6} {:>8} {:>8} {:>8} {:>6}  {}{}\n",
            year.year,
            year.written,
            year.failed,
            year.skipped_links,
            year.index_pages,
            year.output_path.display(),
            if year.index_failed {
                " (index incomplete)"
            } else {
                ""
            }
        ));
    }

    out.push_str(&format!(
        "\nTotal: {} written, {} failed in {:.1}s\n",
        stats.total_written(),
        stats.total_failed(),
        stats.elapsed.as_secs_f64()
    ));

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_statistics() -> CrawlStatistics {
        let mut y2021 = YearStatistics::new(2021, PathBuf::from("race/2021.json"));
        y2021.written = 3400;
        y2021.failed = 2;
        y2021.skipped_links = 5;
        y2021.index_pages = 171;

        let mut y2022 = YearStatistics::new(2022, PathBuf::from("race/2022.json"));
        y2022.written = 12;
        y2022.index_pages = 1;
        y2022.index_failed = true;

        CrawlStatistics {
            years: vec![y2021, y2022],
            elapsed: Duration::from_secs(90),
        }
    }

    #[test]
    fn test_totals() {
        let stats = create_test_statistics();
        assert_eq!(stats.total_written(), 3412);
        assert_eq!(stats.total_failed(), 2);
        assert_eq!(stats.years[0].attempted(), 3402);
    }

    #[test]
    fn test_format_statistics() {
        let text = format_statistics(&create_test_statistics());
        assert!(text.contains("2021"));
        assert!(text.contains("race/2022.json (index incomplete)"));
        assert!(text.contains("Total: 3412 written, 2 failed in 90.0s"));
    }
}
