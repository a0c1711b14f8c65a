//! Raw punch entries as delivered by the attendance-device import pass.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single punch event with provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchDetail {
    /// Clock time of the punch (`HH:MM`).
    pub time: String,
    /// Minute-of-day of the punch, when the import pass precomputed it.
    #[serde(default)]
    pub minute_of_day: Option<u32>,
    /// Device or import source identifier.
    #[serde(default)]
    pub source: Option<String>,
    /// Source files that contributed this punch.
    #[serde(default)]
    pub files: Vec<String>,
}

/// One device-token/date group of raw punches.
///
/// Times arrive unsorted and possibly malformed; [`RawPunchEntry::sorted_times`]
/// parses leniently and drops anything unreadable rather than failing the
/// batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPunchEntry {
    /// The raw device token ("bio" token) the punches were recorded under.
    pub employee_token: String,
    /// The calendar day the punches belong to.
    pub date: NaiveDate,
    /// All punch clock-times for the day (`HH:MM`), unsorted.
    #[serde(default)]
    pub all_times: Vec<String>,
    /// Individual punches with provenance.
    #[serde(default)]
    pub punches: Vec<PunchDetail>,
    /// Source files that contributed this entry.
    #[serde(default)]
    pub source_files: Vec<String>,
    /// Pre-resolved employee id from an earlier pass, if known.
    #[serde(default)]
    pub employee_id: Option<String>,
    /// Pre-resolved office from an earlier pass, if known.
    #[serde(default)]
    pub office: Option<String>,
}

impl RawPunchEntry {
    /// Parses, deduplicates and sorts the entry's punch times.
    ///
    /// Accepts `HH:MM` and `HH:MM:SS`. Unparsable strings are dropped.
    /// Falls back to the per-punch `time` fields when `all_times` is empty.
    pub fn sorted_times(&self) -> Vec<NaiveTime> {
        let raw: Vec<&str> = if self.all_times.is_empty() {
            self.punches.iter().map(|p| p.time.as_str()).collect()
        } else {
            self.all_times.iter().map(String::as_str).collect()
        };

        let mut times: Vec<NaiveTime> = raw.iter().filter_map(|s| parse_clock_time(s)).collect();
        times.sort();
        times.dedup();
        times
    }
}

/// Parses a clock time string, accepting `HH:MM` and `HH:MM:SS`.
pub fn parse_clock_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .ok()
}
