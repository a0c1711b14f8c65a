//! FLEX schedule evaluation: core/bandwidth hours and weekly patterns.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{WeeklyPattern, minute_of_day};

use super::day::DayVerdict;

/// Evaluates one day under a FLEX schedule.
///
/// Without a weekly pattern for the date's weekday: presence is the span
/// between the earliest and latest punch clamped to the bandwidth window,
/// lateness is measured against the core start, and the undertime test
/// compares against the schedule-level required minutes.
///
/// With a pattern governing the weekday (at least one configured window):
/// presence counts only inside the pattern's windows, required minutes come
/// from the pattern, and there is no lateness, only undertime.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_flex(
    date: NaiveDate,
    times: &[NaiveTime],
    core_start: NaiveTime,
    _core_end: NaiveTime,
    bandwidth_start: NaiveTime,
    bandwidth_end: NaiveTime,
    required_minutes: u32,
    weekly_pattern: Option<&WeeklyPattern>,
) -> DayVerdict {
    let pattern_day = weekly_pattern
        .and_then(|p| p.day_for(date))
        .filter(|d| !d.windows.is_empty());

    if let Some(day) = pattern_day {
        let mut verdict = DayVerdict {
            pattern_applied: true,
            ..DayVerdict::default()
        };
        if let (Some(first), Some(last)) = (times.first(), times.last()) {
            verdict.worked_minutes = day
                .windows
                .iter()
                .map(|w| w.overlap_minutes(*first, *last))
                .sum();
        }
        verdict.set_undertime(i64::from(day.required_minutes));
        return verdict;
    }

    let mut verdict = DayVerdict::default();
    let (Some(first), Some(last)) = (times.first(), times.last()) else {
        verdict.set_undertime(i64::from(required_minutes));
        return verdict;
    };

    let arrival = minute_of_day(*first).max(minute_of_day(bandwidth_start));
    let departure = minute_of_day(*last).min(minute_of_day(bandwidth_end));
    verdict.worked_minutes = (departure - arrival).max(0);
    verdict.set_late(minute_of_day(*first) - minute_of_day(core_start));
    verdict.set_undertime(i64::from(required_minutes));
    verdict
}
