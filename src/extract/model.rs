//! Typed race records
//!
//! Every record serializes through a derived `Serialize`, so the JSON key
//! order is the field declaration order below.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// One race result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Race {
    pub race_id: String,
    pub location: String,
    /// "1R" through "12R"
    pub round: String,
    pub race_name: String,
    /// G1, G2, ...; empty for ungraded races
    pub grade: String,
    pub date: String,
    pub start_time: String,
    pub course: String,
    /// Empty for indoor or incompletely recorded races
    pub weather: String,
    /// Empty for indoor or incompletely recorded races
    pub track_condition: String,
    pub race_class: String,
    pub race_rule: String,
    /// Finishing table rows, in published order
    pub horses: Vec<Horse>,
    pub payback: Payback,
    pub order_of_bend: Vec<BendOrder>,
    #[serde(serialize_with = "some_or_empty_object")]
    pub rap_time: Option<RapTime>,
}

/// One row of the finishing table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Horse {
    pub rank: String,
    pub bracket_number: String,
    pub horse_number: String,
    pub horse: Identity,
    pub gender: String,
    pub age: String,
    pub weight_to_carry: String,
    pub jockey: Identity,
    pub time: String,
    pub margin: String,
    pub time_index: String,
    pub passing: String,
    /// Final furlongs time
    pub last_leg: String,
    pub win_odds: String,
    pub popularity: String,
    pub horse_weight: String,
    pub note: String,
    pub trainer: Identity,
    pub owner: Identity,
    pub prize: String,
}

/// An `{id, name}` pair read from a profile link
///
/// Both fields are empty when the page had no link; such an identity
/// serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Identity {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Identity {
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

/// Payouts per bet type
///
/// A bet type without payout rows is an empty vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Payback {
    /// Win
    pub tansho: Vec<PaybackEntry>,
    /// Place
    pub fukusho: Vec<PaybackEntry>,
    /// Bracket quinella
    pub wakuren: Vec<PaybackEntry>,
    /// Quinella
    pub umaren: Vec<PaybackEntry>,
    /// Quinella place
    pub wide: Vec<PaybackEntry>,
    /// Exacta
    pub umatan: Vec<PaybackEntry>,
    /// Trio
    pub fuku3: Vec<PaybackEntry>,
    /// Trifecta
    pub tan3: Vec<PaybackEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaybackEntry {
    pub result: String,
    pub payout: String,
    pub popularity: String,
}

/// Standings at one corner of the course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BendOrder {
    pub bend: String,
    pub order: String,
}

/// Pace data for the race
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RapTime {
    pub race_pace: String,
    pub rap_pace: String,
    pub laps: Vec<Lap>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lap {
    pub distance: String,
    /// Cumulative time at this distance
    pub pass_time: String,
    /// Time of this segment alone
    pub lap_time: String,
}

fn some_or_empty_object<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    match value {
        Some(value) => value.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
