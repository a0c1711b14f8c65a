//! Schedule models: work schedules, exceptions, weekly exclusions and patterns.
//!
//! Schedule rows arrive from the administrative collaborators with raw
//! `HH:MM` string fields and optional sub-fields; the resolver normalizes
//! them into [`ScheduleKind`] values with every field populated so the day
//! evaluator never handles missing data.

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Returns the minute-of-day for a clock time (00:00 = 0, 23:59 = 1439).
pub fn minute_of_day(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Returns the ISO weekday number for a date (Monday = 1, Sunday = 7).
pub fn weekday_number(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// The schedule variant governing a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleType {
    /// Fixed window with a grace period after the start time.
    Fixed,
    /// Flexible core/bandwidth hours, optionally scoped by a weekly pattern.
    Flex,
    /// Shift with explicit start/end that may cross midnight.
    Shift,
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleType::Fixed => write!(f, "FIXED"),
            ScheduleType::Flex => write!(f, "FLEX"),
            ScheduleType::Shift => write!(f, "SHIFT"),
        }
    }
}

/// An inclusive date window, used for evaluation requests and bulk preloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// Returns true if `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A counted time window inside a weekly pattern day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Window start (inclusive).
    pub start: NaiveTime,
    /// Window end (exclusive for counting purposes).
    pub end: NaiveTime,
}

impl TimeWindow {
    /// Returns the number of minutes of `[earliest, latest]` that fall
    /// inside this window, floored at zero.
    pub fn overlap_minutes(&self, earliest: NaiveTime, latest: NaiveTime) -> i64 {
        let lo = minute_of_day(earliest).max(minute_of_day(self.start));
        let hi = minute_of_day(latest).min(minute_of_day(self.end));
        (hi - lo).max(0)
    }
}

/// Per-weekday configuration inside a normalized weekly pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDay {
    /// Counted time windows for the day (at most 3).
    pub windows: Vec<TimeWindow>,
    /// Required net minutes for the day.
    pub required_minutes: u32,
}

/// Normalized weekly pattern for FLEX schedules, keyed by ISO weekday number
/// (Monday = 1). A weekday with no entry is unconstrained by pattern rules.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeeklyPattern {
    /// Configured days keyed by weekday number.
    pub days: BTreeMap<u8, PatternDay>,
}

impl WeeklyPattern {
    /// Returns the pattern configuration for the given date's weekday, if any.
    pub fn day_for(&self, date: NaiveDate) -> Option<&PatternDay> {
        self.days.get(&weekday_number(date))
    }
}

/// A raw `HH:MM`/`HH:MM` window as stored by the collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTimeWindow {
    /// Raw window start string.
    pub start: String,
    /// Raw window end string.
    pub end: String,
}

/// A raw per-weekday pattern entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPatternDay {
    /// Raw counted windows for the day.
    #[serde(default)]
    pub windows: Vec<RawTimeWindow>,
    /// Required net minutes for the day.
    pub required_minutes: u32,
}

/// A raw weekly pattern as stored, keyed by ISO weekday number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawWeeklyPattern {
    /// Configured days keyed by weekday number (Monday = 1).
    #[serde(default)]
    pub days: BTreeMap<u8, RawPatternDay>,
}

/// Type-specific schedule fields as stored by the administrative
/// collaborators. Time fields are raw strings and any field may be absent;
/// the resolver's normalization step fills in defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawScheduleFields {
    /// Start time for FIXED/SHIFT schedules (`HH:MM`).
    #[serde(default)]
    pub start_time: Option<String>,
    /// End time for FIXED/SHIFT schedules (`HH:MM`).
    #[serde(default)]
    pub end_time: Option<String>,
    /// Unpaid break minutes subtracted from worked time.
    #[serde(default)]
    pub break_minutes: Option<u32>,
    /// Grace minutes after the start time before a punch counts as late.
    #[serde(default)]
    pub grace_minutes: Option<u32>,
    /// Core-hours start for FLEX schedules (`HH:MM`).
    #[serde(default)]
    pub core_start: Option<String>,
    /// Core-hours end for FLEX schedules (`HH:MM`).
    #[serde(default)]
    pub core_end: Option<String>,
    /// Bandwidth start for FLEX schedules (`HH:MM`).
    #[serde(default)]
    pub bandwidth_start: Option<String>,
    /// Bandwidth end for FLEX schedules (`HH:MM`).
    #[serde(default)]
    pub bandwidth_end: Option<String>,
    /// Required net minutes per day.
    #[serde(default)]
    pub required_minutes: Option<u32>,
    /// Weekly pattern for FLEX schedules.
    #[serde(default)]
    pub weekly_pattern: Option<RawWeeklyPattern>,
}

/// A time-boxed schedule record for an employee.
///
/// Ranges for the same employee should not overlap; the resolver tolerates
/// overlap by preferring the most recently started record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// The employee this schedule belongs to.
    pub employee_id: String,
    /// The schedule variant.
    pub schedule_type: ScheduleType,
    /// Type-specific raw fields.
    pub fields: RawScheduleFields,
    /// First day the schedule applies (inclusive).
    pub effective_from: NaiveDate,
    /// Day the schedule stops applying (exclusive); open-ended when `None`.
    pub effective_to: Option<NaiveDate>,
}

impl WorkSchedule {
    /// Returns true if the half-open effective range covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date < to)
    }

    /// Returns true if the effective range overlaps the given window.
    pub fn overlaps(&self, window: DateWindow) -> bool {
        self.effective_from <= window.end && self.effective_to.is_none_or(|to| to > window.start)
    }
}

/// A single-date override that always beats [`WorkSchedule`] on its date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleException {
    /// The employee this exception belongs to.
    pub employee_id: String,
    /// The exact date the exception applies to.
    pub date: NaiveDate,
    /// The schedule variant.
    pub schedule_type: ScheduleType,
    /// Type-specific raw fields.
    pub fields: RawScheduleFields,
}

/// The policy applied by a weekly exclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExclusionMode {
    /// Lateness and undertime are both suppressed for the day.
    Excused,
    /// Punches at or before `ignore_until` (minute-of-day) are treated as
    /// arriving exactly at the schedule's expected start.
    IgnoreLateUntil {
        /// Minute-of-day cutoff (e.g. 510 for 08:30).
        ignore_until: u32,
    },
}

/// A day-of-week policy that suppresses or caps lateness independent of the
/// underlying schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyExclusion {
    /// The employee this exclusion belongs to.
    pub employee_id: String,
    /// ISO weekday number the policy applies to (Monday = 1).
    pub weekday: u8,
    /// The policy mode.
    #[serde(flatten)]
    pub mode: ExclusionMode,
    /// First day the exclusion applies (inclusive).
    pub effective_from: NaiveDate,
    /// Day the exclusion stops applying (exclusive); open-ended when `None`.
    pub effective_to: Option<NaiveDate>,
}

impl WeeklyExclusion {
    /// Returns true if the half-open effective range covers `date`.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.effective_from && self.effective_to.is_none_or(|to| date < to)
    }

    /// Returns true if the effective range overlaps the given window.
    pub fn overlaps(&self, window: DateWindow) -> bool {
        self.effective_from <= window.end && self.effective_to.is_none_or(|to| to > window.start)
    }
}
