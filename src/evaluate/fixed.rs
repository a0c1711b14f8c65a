//! FIXED schedule evaluation: a fixed window with a grace period.

use chrono::NaiveTime;

use crate::models::minute_of_day;

use super::day::DayVerdict;

/// Evaluates one day under a FIXED schedule.
///
/// Late iff the earliest punch falls after `start + grace`; the late
/// magnitude is the clamped-to-zero overage past the grace boundary. Worked
/// minutes are `(latest - earliest) - break`, floored at 0, and the day is
/// undertime when they fall short of the scheduled net span.
pub fn evaluate_fixed(
    times: &[NaiveTime],
    start: NaiveTime,
    end: NaiveTime,
    break_minutes: u32,
    grace_minutes: u32,
) -> DayVerdict {
    let required = (minute_of_day(end) - minute_of_day(start) - i64::from(break_minutes)).max(0);
    let mut verdict = DayVerdict::default();

    let (Some(first), Some(last)) = (times.first(), times.last()) else {
        verdict.set_undertime(required);
        return verdict;
    };

    verdict.worked_minutes =
        (minute_of_day(*last) - minute_of_day(*first) - i64::from(break_minutes)).max(0);
    verdict.set_late(
        minute_of_day(*first) - minute_of_day(start) - i64::from(grace_minutes),
    );
    verdict.set_undertime(required);
    verdict
}
