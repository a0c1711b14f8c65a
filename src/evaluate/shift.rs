//! SHIFT schedule evaluation, including shifts that cross midnight.

use chrono::NaiveTime;

use crate::models::minute_of_day;

use super::day::DayVerdict;

/// Evaluates one day under a SHIFT schedule.
///
/// An end time numerically before the start means the shift spans into the
/// next calendar day; internally the end boundary gets 24 hours added and
/// punches at or before the end clock-time are attributed to the next day
/// on the same timeline. The day itself stays attributed to the shift's
/// start date. Undertime is only tested when the schedule states required
/// minutes.
pub fn evaluate_shift(
    times: &[NaiveTime],
    start: NaiveTime,
    end: NaiveTime,
    break_minutes: u32,
    grace_minutes: u32,
    required_minutes: Option<u32>,
) -> DayVerdict {
    let start_min = minute_of_day(start);
    let mut end_min = minute_of_day(end);
    let overnight = end_min <= start_min;
    if overnight {
        end_min += 24 * 60;
    }

    let mut verdict = DayVerdict::default();

    // Map punches onto the shift timeline: for an overnight shift, a punch
    // at or before the end clock-time belongs to the morning after.
    let mapped: Vec<i64> = times
        .iter()
        .map(|t| {
            let m = minute_of_day(*t);
            if overnight && m <= minute_of_day(end) {
                m + 24 * 60
            } else {
                m
            }
        })
        .collect();

    let (Some(first), Some(last)) = (
        mapped.iter().min().copied(),
        mapped.iter().max().copied(),
    ) else {
        if let Some(required) = required_minutes {
            verdict.set_undertime(i64::from(required));
        }
        return verdict;
    };

    verdict.worked_minutes = (last - first - i64::from(break_minutes)).max(0);
    verdict.set_late(first - start_min - i64::from(grace_minutes));
    if let Some(required) = required_minutes {
        verdict.set_undertime(i64::from(required));
    }
    verdict
}
