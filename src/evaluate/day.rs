//! Per-day verdict computation: variant dispatch and weekly-exclusion
//! overrides.

use chrono::{NaiveDate, NaiveTime};

use crate::models::{ExclusionMode, minute_of_day};
use crate::resolve::ScheduleKind;

use super::fixed::evaluate_fixed;
use super::flex::evaluate_flex;
use super::shift::evaluate_shift;

/// The computed verdict for one employee-day, before identity and source
/// metadata are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayVerdict {
    /// Net worked minutes, never negative.
    pub worked_minutes: i64,
    /// Whether the day counts as late.
    pub is_late: bool,
    /// Late magnitude in minutes, 0 when not late.
    pub late_minutes: i64,
    /// Whether the day counts as undertime.
    pub is_undertime: bool,
    /// Undertime magnitude in minutes, 0 when not undertime.
    pub undertime_minutes: i64,
    /// Whether a weekly pattern scoped presence counting.
    pub pattern_applied: bool,
    /// Whether a weekly exclusion altered the verdict.
    pub exclusion_applied: bool,
}

impl DayVerdict {
    /// Marks the day late by the given clamped-to-zero overage.
    pub(super) fn set_late(&mut self, overage: i64) {
        if overage > 0 {
            self.is_late = true;
            self.late_minutes = overage;
        }
    }

    /// Marks the day undertime when worked minutes fall short of `required`.
    pub(super) fn set_undertime(&mut self, required: i64) {
        if self.worked_minutes < required {
            self.is_undertime = true;
            self.undertime_minutes = required - self.worked_minutes;
        }
    }
}

/// Evaluates one employee-day.
///
/// Pure time-math: no I/O, never panics. `times` must be sorted ascending
/// (see [`crate::models::RawPunchEntry::sorted_times`]).
pub fn evaluate_day(
    date: NaiveDate,
    times: &[NaiveTime],
    schedule: &ScheduleKind,
    exclusion: Option<&ExclusionMode>,
) -> DayVerdict {
    let mut verdict = match schedule {
        ScheduleKind::Fixed {
            start,
            end,
            break_minutes,
            grace_minutes,
        } => evaluate_fixed(times, *start, *end, *break_minutes, *grace_minutes),
        ScheduleKind::Flex {
            core_start,
            core_end,
            bandwidth_start,
            bandwidth_end,
            required_minutes,
            weekly_pattern,
        } => evaluate_flex(
            date,
            times,
            *core_start,
            *core_end,
            *bandwidth_start,
            *bandwidth_end,
            *required_minutes,
            weekly_pattern.as_ref(),
        ),
        ScheduleKind::Shift {
            start,
            end,
            break_minutes,
            grace_minutes,
            required_minutes,
        } => evaluate_shift(
            times,
            *start,
            *end,
            *break_minutes,
            *grace_minutes,
            *required_minutes,
        ),
    };

    if let Some(mode) = exclusion {
        apply_exclusion(&mut verdict, times, mode);
    }
    verdict
}

/// Applies the weekly exclusion policy on top of the computed verdict.
fn apply_exclusion(verdict: &mut DayVerdict, times: &[NaiveTime], mode: &ExclusionMode) {
    match mode {
        ExclusionMode::Excused => {
            verdict.is_late = false;
            verdict.late_minutes = 0;
            verdict.is_undertime = false;
            verdict.undertime_minutes = 0;
            verdict.exclusion_applied = true;
        }
        ExclusionMode::IgnoreLateUntil { ignore_until } => {
            // An arrival at or before the cutoff is treated as arriving
            // exactly at the expected start; worked-minutes accounting is
            // deliberately untouched.
            if let Some(first) = times.first() {
                if verdict.is_late && minute_of_day(*first) <= i64::from(*ignore_until) {
                    verdict.is_late = false;
                    verdict.late_minutes = 0;
                    verdict.exclusion_applied = true;
                }
            }
        }
    }
}
