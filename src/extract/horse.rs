//! Finishing table rows

use super::dom::{children_named, clean, own_text, text_content};
use super::model::{Horse, Identity};
use crate::ExtractionError;
use scraper::ElementRef;

/// Number of cells in a finishing table row
pub(crate) const COLUMNS: usize = 21;

/// Builds a [`Horse`] from one `tr` of the finishing table
///
/// Cells map ordinally; columns 16 and 17 are not recorded. `row` is only
/// used to name the field in errors.
pub(crate) fn parse_horse_row(tr: ElementRef<'_>, row: usize) -> Result<Horse, ExtractionError> {
    let cells: Vec<ElementRef<'_>> = children_named(tr, "td").collect();
    if cells.len() < COLUMNS {
        return Err(ExtractionError::missing(format!(
            "horses[{}].td[{}]",
            row,
            cells.len() + 1
        )));
    }

    // 1-based, matching the column numbering of the published table
    let cell = |n: usize| cells[n - 1];
    let text = |n: usize| own_text(cell(n));

    let (gender, age) = split_gender_age(&text(5));

    Ok(Horse {
        rank: text(1),
        bracket_number: text(2),
        horse_number: text(3),
        horse: identity(cell(4), "horse"),
        gender,
        age,
        weight_to_carry: text(6),
        jockey: identity(cell(7), "jockey"),
        time: text(8),
        margin: text(9),
        time_index: text(10),
        passing: text(11),
        last_leg: text(12),
        win_odds: text(13),
        popularity: text(14),
        horse_weight: text(15),
        note: text(18),
        trainer: identity(cell(19), "trainer"),
        owner: identity(cell(20), "owner"),
        prize: text(21),
    })
}

/// Splits e.g. "牡3" into ("牡", "3")
fn split_gender_age(combined: &str) -> (String, String) {
    let mut chars = combined.chars();
    match chars.next() {
        Some(gender) => (gender.to_string(), chars.as_str().to_string()),
        None => (String::new(), String::new()),
    }
}

/// Reads the profile link of a cell
///
/// A cell without a link yields an empty identity.
fn identity(cell: ElementRef<'_>, kind: &str) -> Identity {
    let Some(anchor) = children_named(cell, "a").next() else {
        return Identity::default();
    };
    let Some(href) = anchor.value().attr("href") else {
        return Identity::default();
    };

    Identity {
        id: profile_id(href, kind),
        name: text_content(anchor),
    }
}

/// `https://db.sp.netkeiba.com/horse/abc123/` with kind `horse` -> `abc123`
pub(crate) fn profile_id(href: &str, kind: &str) -> String {
    let prefix = format!("/{kind}/");
    let rest = href
        .split_once(prefix.as_str())
        .map_or(href, |(_, rest)| rest);
    clean(&rest.replace('/', ""))
}
