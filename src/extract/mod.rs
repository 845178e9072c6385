//! Record extraction from race detail pages
//!
//! This module turns one fetched detail document into a [`Race`]:
//! - Header fields located by fixed structural paths
//! - The finishing table, one [`Horse`] per row
//! - Payouts per bet type
//! - Optional corner standings and lap times
//!
//! Required fields that are absent abort the record with an
//! [`ExtractionError`] naming the field. Optional fields degrade to empty
//! values and never abort.

pub(crate) mod dom;
mod horse;
mod model;
mod payback;
mod rap_time;

pub use model::{BendOrder, Horse, Identity, Lap, Payback, PaybackEntry, Race, RapTime};

use crate::ExtractionError;
use dom::{children_named, exactly_one, own_text, require, selector, text_content};
use regex::Regex;
use scraper::Html;

/// Turns a fetched detail page into a record
///
/// Implementations must be pure: extracting the same document twice yields
/// equal records.
pub trait RecordExtractor {
    fn extract(&self, url: &str, html: &str) -> Result<Race, ExtractionError>;
}

/// Extractor for the smartphone layout of db.netkeiba.com
#[derive(Debug, Clone)]
pub struct NetkeibaExtractor {
    time_pattern: Regex,
}

impl NetkeibaExtractor {
    pub fn new() -> Result<Self, ExtractionError> {
        let time_pattern = Regex::new(rap_time::TIME_PATTERN)
            .map_err(|e| ExtractionError::Pattern(e.to_string()))?;
        Ok(Self { time_pattern })
    }
}

impl RecordExtractor for NetkeibaExtractor {
    fn extract(&self, url: &str, html: &str) -> Result<Race, ExtractionError> {
        let document = Html::parse_document(html);

        let race_data = |n: usize| format!(".RaceData > span:nth-of-type({n})");
        let others = |n: usize| format!(".RaceHeader_Value_Others > span:nth-of-type({n})");

        let location = own_text(require(
            &document,
            ".RaceHeader_Select > div:nth-of-type(1) > select > option[selected]",
            "location",
        )?);
        let round = own_text(require(
            &document,
            ".RaceHeader_Select > div:nth-of-type(2) > select > option[selected]",
            "round",
        )?);
        let race_name = own_text(require(&document, ".RaceName_main", "race_name")?);
        let date = text_content(require(&document, ".Race_Date", "date")?);
        let start_time = own_text(require(&document, &race_data(1), "start_time")?);
        let course = own_text(require(&document, &race_data(2), "course")?);
        let weather = exactly_one(&document, &race_data(3))?
            .map(own_text)
            .unwrap_or_default();
        let track_condition = exactly_one(&document, &race_data(4))?
            .map(own_text)
            .unwrap_or_default();
        let race_class = own_text(require(&document, &others(1), "race_class")?);
        let race_rule = own_text(require(&document, &others(2), "race_rule")?);

        let horses = document
            .select(&selector(
                ".table_slide_body.ResultsByRaceDetail > tbody > tr",
            )?)
            .enumerate()
            .map(|(row, tr)| horse::parse_horse_row(tr, row))
            .collect::<Result<Vec<_>, _>>()?;

        let payback =
            payback::parse_payback(require(&document, ".Result_Pay_Back", "payback")?)?;

        let rap_time = exactly_one(&document, ".Race_Raptime")?
            .map(|container| rap_time::parse_rap_time(container, &self.time_pattern))
            .transpose()?;

        Ok(Race {
            race_id: race_id(url),
            location,
            round,
            race_name,
            grade: grade(&document)?,
            date,
            start_time,
            course,
            weather,
            track_condition,
            race_class,
            race_rule,
            horses,
            payback,
            order_of_bend: order_of_bend(&document)?,
            rap_time,
        })
    }
}

/// The last path segment of a detail URL: `.../race/202245020211/` -> `202245020211`
fn race_id(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// The second `.RaceName` label when the race is graded
fn grade(document: &Html) -> Result<String, ExtractionError> {
    let labels: Vec<_> = document.select(&selector(".RaceName > span")?).collect();
    Ok(match labels.as_slice() {
        [_, grade] => own_text(*grade),
        _ => String::new(),
    })
}

/// Corner standings, skipping the two header rows of the table
fn order_of_bend(document: &Html) -> Result<Vec<BendOrder>, ExtractionError> {
    document
        .select(&selector(".result_corner > table > tbody > tr")?)
        .skip(2)
        .enumerate()
        .map(|(i, tr)| -> Result<BendOrder, ExtractionError> {
            let bend = children_named(tr, "th")
                .next()
                .ok_or_else(|| ExtractionError::missing(format!("order_of_bend[{i}].th")))?;
            let order = children_named(tr, "td")
                .next()
                .ok_or_else(|| ExtractionError::missing(format!("order_of_bend[{i}].td")))?;
            Ok(BendOrder {
                bend: own_text(bend),
                order: text_content(order),
            })
        })
        .collect()
}
