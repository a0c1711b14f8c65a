//! Weekly exclusion resolution.

use chrono::NaiveDate;

use crate::models::{WeeklyExclusion, weekday_number};

/// Selects the weekly exclusion governing `date`, if any: weekday must match
/// and the effective range must contain the date.
///
/// Overlapping ranges for the same employee/weekday are invalid and are
/// rejected upstream at write time. When the data violates that anyway, the
/// first match in stored order wins, deterministically; the engine does not
/// re-rank or repair the overlap.
pub fn effective_exclusion(
    exclusions: &[WeeklyExclusion],
    date: NaiveDate,
) -> Option<&WeeklyExclusion> {
    let weekday = weekday_number(date);
    exclusions
        .iter()
        .find(|x| x.weekday == weekday && x.covers(date))
}
