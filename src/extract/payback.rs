//! Payout tables

use super::dom::{own_text, require_in, selector};
use super::model::{Payback, PaybackEntry};
use crate::ExtractionError;
use scraper::ElementRef;

/// Reads all eight bet types below the `.Result_Pay_Back` container
///
/// A bet type whose table is absent yields an empty vector.
pub(crate) fn parse_payback(container: ElementRef<'_>) -> Result<Payback, ExtractionError> {
    Ok(Payback {
        tansho: parse_category(container, "Tansho")?,
        fukusho: parse_category(container, "Fukusho")?,
        wakuren: parse_category(container, "Wakuren")?,
        umaren: parse_category(container, "Umaren")?,
        wide: parse_category(container, "Wide")?,
        umatan: parse_category(container, "Umatan")?,
        fuku3: parse_category(container, "Fuku3")?,
        tan3: parse_category(container, "Tan3")?,
    })
}

fn parse_category(
    container: ElementRef<'_>,
    class: &str,
) -> Result<Vec<PaybackEntry>, ExtractionError> {
    let rows = selector(&format!("table > tbody.{class} > tr"))?;

    container
        .select(&rows)
        .enumerate()
        .map(|(i, tr)| -> Result<PaybackEntry, ExtractionError> {
            let field = |column: &str| format!("payback.{class}[{i}].{column}");
            Ok(PaybackEntry {
                result: own_text(require_in(tr, "td.Result", &field("Result"))?),
                payout: own_text(require_in(tr, "td.Payout", &field("Payout"))?),
                popularity: own_text(require_in(tr, "td.Ninki", &field("Ninki"))?),
            })
        })
        .collect()
}
