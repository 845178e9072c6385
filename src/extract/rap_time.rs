//! Lap times

use super::dom::{own_text, require_in, selector};
use super::model::{Lap, RapTime};
use crate::ExtractionError;
use regex::Regex;
use scraper::ElementRef;

/// Optional minutes, colon, seconds, decimal: `12.3`, `1:10.5`
pub(crate) const TIME_PATTERN: &str = r"\d?:?\d+\.\d+";

/// Reads pace descriptors and per-distance times below `.Race_Raptime`
///
/// Header cells without text have no paired time cell and are skipped.
/// Every kept time cell must hold two times: the cumulative pass time
/// followed by the segment lap time.
pub(crate) fn parse_rap_time(
    container: ElementRef<'_>,
    time_pattern: &Regex,
) -> Result<RapTime, ExtractionError> {
    let race_pace = own_text(require_in(container, "span.RapPace > span", "rap_time.race_pace")?);
    let rap_pace = own_text(require_in(container, "div.rap_pace", "rap_time.rap_pace")?);

    let headers = selector("tr.Header > th")?;
    let times = selector("tr.HaronTime > td")?;

    let mut laps = Vec::new();
    for (th, td) in container.select(&headers).zip(container.select(&times)) {
        let distance = own_text(th);
        if distance.is_empty() {
            continue;
        }

        let markup = td.html();
        let mut found = time_pattern.find_iter(&markup).map(|m| m.as_str().to_string());
        let (Some(pass_time), Some(lap_time)) = (found.next(), found.next()) else {
            return Err(ExtractionError::Malformed {
                field: format!("rap_time.{distance}"),
                value: markup,
            });
        };

        laps.push(Lap {
            distance,
            pass_time,
            lap_time,
        });
    }

    Ok(RapTime {
        race_pace,
        rap_pace,
        laps,
    })
}
