//! Schedule normalization.
//!
//! Stored schedule rows carry raw string time fields with anything possibly
//! absent or unreadable. Normalization turns a row into a [`ScheduleKind`]
//! with every field populated so the day evaluator never branches on missing
//! data. Missing fields take documented defaults; present-but-unparsable
//! essential fields degrade the whole row to the hard-coded default fixed
//! schedule (the caller then reports the day's source as `DEFAULT`).

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::models::{
    PatternDay, RawScheduleFields, RawWeeklyPattern, ScheduleType, TimeWindow, WeeklyPattern,
    parse_clock_time,
};

/// A fully normalized schedule, one variant per schedule type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Fixed window with grace.
    Fixed {
        /// Expected start time.
        start: NaiveTime,
        /// Expected end time.
        end: NaiveTime,
        /// Unpaid break minutes.
        break_minutes: u32,
        /// Grace minutes after `start` before a punch counts as late.
        grace_minutes: u32,
    },
    /// Flexible core/bandwidth hours.
    Flex {
        /// Mandatory-presence window start.
        core_start: NaiveTime,
        /// Mandatory-presence window end.
        core_end: NaiveTime,
        /// Outer window start within which arrival is permitted.
        bandwidth_start: NaiveTime,
        /// Outer window end within which departure is permitted.
        bandwidth_end: NaiveTime,
        /// Required net minutes per day (pattern days override this).
        required_minutes: u32,
        /// Per-weekday counted windows, when configured.
        weekly_pattern: Option<WeeklyPattern>,
    },
    /// Shift with explicit boundaries; `end` earlier than `start` means the
    /// shift crosses midnight into the next calendar day.
    Shift {
        /// Shift start time.
        start: NaiveTime,
        /// Shift end time (possibly numerically before `start`).
        end: NaiveTime,
        /// Unpaid break minutes.
        break_minutes: u32,
        /// Grace minutes after `start` before a punch counts as late.
        grace_minutes: u32,
        /// Required net minutes, when the shift caps undertime explicitly.
        required_minutes: Option<u32>,
    },
}

impl ScheduleKind {
    /// Returns the variant tag for reporting.
    pub fn schedule_type(&self) -> ScheduleType {
        match self {
            ScheduleKind::Fixed { .. } => ScheduleType::Fixed,
            ScheduleKind::Flex { .. } => ScheduleType::Flex,
            ScheduleKind::Shift { .. } => ScheduleType::Shift,
        }
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    // Constants below stay within valid clock range.
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN)
}

/// The hard-coded fallback: fixed 08:00–17:00, 60-minute break, 0 grace.
pub fn default_fixed() -> ScheduleKind {
    ScheduleKind::Fixed {
        start: hm(8, 0),
        end: hm(17, 0),
        break_minutes: 60,
        grace_minutes: 0,
    }
}

/// Outcome of normalizing one stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// The canonical schedule.
    pub kind: ScheduleKind,
    /// True when an essential field was present but unreadable and the row
    /// was replaced by [`default_fixed`].
    pub degraded: bool,
}

/// Parses an optional stored time string. `Ok(None)` means absent,
/// `Err(())` means present but unreadable.
fn parse_opt(raw: &Option<String>) -> Result<Option<NaiveTime>, ()> {
    match raw {
        None => Ok(None),
        Some(s) => parse_clock_time(s).map(Some).ok_or(()),
    }
}

/// Normalizes one stored schedule row into a canonical [`ScheduleKind`].
pub fn normalize(schedule_type: ScheduleType, fields: &RawScheduleFields) -> Normalized {
    match try_normalize(schedule_type, fields) {
        Ok(kind) => Normalized {
            kind,
            degraded: false,
        },
        Err(()) => Normalized {
            kind: default_fixed(),
            degraded: true,
        },
    }
}

fn try_normalize(
    schedule_type: ScheduleType,
    fields: &RawScheduleFields,
) -> Result<ScheduleKind, ()> {
    match schedule_type {
        ScheduleType::Fixed => Ok(ScheduleKind::Fixed {
            start: parse_opt(&fields.start_time)?.unwrap_or(hm(8, 0)),
            end: parse_opt(&fields.end_time)?.unwrap_or(hm(17, 0)),
            break_minutes: fields.break_minutes.unwrap_or(60),
            grace_minutes: fields.grace_minutes.unwrap_or(0),
        }),
        ScheduleType::Flex => Ok(ScheduleKind::Flex {
            core_start: parse_opt(&fields.core_start)?.unwrap_or(hm(10, 0)),
            core_end: parse_opt(&fields.core_end)?.unwrap_or(hm(15, 0)),
            bandwidth_start: parse_opt(&fields.bandwidth_start)?.unwrap_or(hm(6, 0)),
            bandwidth_end: parse_opt(&fields.bandwidth_end)?.unwrap_or(hm(20, 0)),
            required_minutes: fields.required_minutes.unwrap_or(480),
            weekly_pattern: fields.weekly_pattern.as_ref().map(normalize_pattern),
        }),
        ScheduleType::Shift => {
            // A shift without explicit boundaries is meaningless; treat it
            // like any other unreadable row.
            let start = parse_opt(&fields.start_time)?.ok_or(())?;
            let end = parse_opt(&fields.end_time)?.ok_or(())?;
            Ok(ScheduleKind::Shift {
                start,
                end,
                break_minutes: fields.break_minutes.unwrap_or(0),
                grace_minutes: fields.grace_minutes.unwrap_or(0),
                required_minutes: fields.required_minutes,
            })
        }
    }
}

/// Normalizes a raw weekly pattern, keeping at most 3 readable windows per
/// day and dropping windows that fail to parse.
fn normalize_pattern(raw: &RawWeeklyPattern) -> WeeklyPattern {
    let days = raw
        .days
        .iter()
        .map(|(weekday, day)| {
            let windows: Vec<TimeWindow> = day
                .windows
                .iter()
                .filter_map(|w| {
                    Some(TimeWindow {
                        start: parse_clock_time(&w.start)?,
                        end: parse_clock_time(&w.end)?,
                    })
                })
                .take(3)
                .collect();
            (
                *weekday,
                PatternDay {
                    windows,
                    required_minutes: day.required_minutes,
                },
            )
        })
        .collect();
    WeeklyPattern { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawPatternDay, RawTimeWindow};
    use std::collections::BTreeMap;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    // ==========================================================================
    // NRM-001: empty fixed row takes the documented defaults
    // ==========================================================================
    #[test]
    fn test_nrm_001_fixed_defaults() {
        let normalized = normalize(ScheduleType::Fixed, &RawScheduleFields::default());
        assert!(!normalized.degraded);
        assert_eq!(normalized.kind, default_fixed());
    }

    // ==========================================================================
    // NRM-002: empty flex row takes core 10:00-15:00, bandwidth 06:00-20:00,
    // required 480
    // ==========================================================================
    #[test]
    fn test_nrm_002_flex_defaults() {
        let normalized = normalize(ScheduleType::Flex, &RawScheduleFields::default());
        assert!(!normalized.degraded);
        match normalized.kind {
            ScheduleKind::Flex {
                core_start,
                core_end,
                bandwidth_start,
                bandwidth_end,
                required_minutes,
                weekly_pattern,
            } => {
                assert_eq!(core_start, time("10:00"));
                assert_eq!(core_end, time("15:00"));
                assert_eq!(bandwidth_start, time("06:00"));
                assert_eq!(bandwidth_end, time("20:00"));
                assert_eq!(required_minutes, 480);
                assert!(weekly_pattern.is_none());
            }
            other => panic!("expected flex, got {other:?}"),
        }
    }

    // ==========================================================================
    // NRM-003: unparsable time string degrades the row to the default
    // ==========================================================================
    #[test]
    fn test_nrm_003_unparsable_time_degrades() {
        let fields = RawScheduleFields {
            start_time: Some("late-ish".to_string()),
            ..RawScheduleFields::default()
        };
        let normalized = normalize(ScheduleType::Fixed, &fields);
        assert!(normalized.degraded);
        assert_eq!(normalized.kind, default_fixed());
    }

    // ==========================================================================
    // NRM-004: shift without boundaries degrades
    // ==========================================================================
    #[test]
    fn test_nrm_004_shift_requires_boundaries() {
        let normalized = normalize(ScheduleType::Shift, &RawScheduleFields::default());
        assert!(normalized.degraded);

        let fields = RawScheduleFields {
            start_time: Some("22:00".to_string()),
            end_time: Some("06:00".to_string()),
            ..RawScheduleFields::default()
        };
        let normalized = normalize(ScheduleType::Shift, &fields);
        assert!(!normalized.degraded);
        match normalized.kind {
            ScheduleKind::Shift {
                start,
                end,
                break_minutes,
                grace_minutes,
                required_minutes,
            } => {
                assert_eq!(start, time("22:00"));
                assert_eq!(end, time("06:00"));
                assert_eq!(break_minutes, 0);
                assert_eq!(grace_minutes, 0);
                assert!(required_minutes.is_none());
            }
            other => panic!("expected shift, got {other:?}"),
        }
    }

    #[test]
    fn test_fixed_explicit_fields_kept() {
        let fields = RawScheduleFields {
            start_time: Some("09:30".to_string()),
            end_time: Some("18:30".to_string()),
            break_minutes: Some(30),
            grace_minutes: Some(10),
            ..RawScheduleFields::default()
        };
        let normalized = normalize(ScheduleType::Fixed, &fields);
        assert_eq!(
            normalized.kind,
            ScheduleKind::Fixed {
                start: time("09:30"),
                end: time("18:30"),
                break_minutes: 30,
                grace_minutes: 10,
            }
        );
    }

    #[test]
    fn test_pattern_windows_capped_at_three_and_bad_windows_dropped() {
        let mut days = BTreeMap::new();
        days.insert(
            1,
            RawPatternDay {
                windows: vec![
                    RawTimeWindow {
                        start: "09:00".to_string(),
                        end: "11:00".to_string(),
                    },
                    RawTimeWindow {
                        start: "bogus".to_string(),
                        end: "12:00".to_string(),
                    },
                    RawTimeWindow {
                        start: "13:00".to_string(),
                        end: "15:00".to_string(),
                    },
                    RawTimeWindow {
                        start: "16:00".to_string(),
                        end: "17:00".to_string(),
                    },
                    RawTimeWindow {
                        start: "18:00".to_string(),
                        end: "19:00".to_string(),
                    },
                ],
                required_minutes: 300,
            },
        );
        let fields = RawScheduleFields {
            weekly_pattern: Some(RawWeeklyPattern { days }),
            ..RawScheduleFields::default()
        };

        let normalized = normalize(ScheduleType::Flex, &fields);
        let ScheduleKind::Flex { weekly_pattern, .. } = normalized.kind else {
            panic!("expected flex");
        };
        let pattern = weekly_pattern.unwrap();
        let monday = &pattern.days[&1];
        assert_eq!(monday.windows.len(), 3);
        assert_eq!(monday.required_minutes, 300);
    }

    #[test]
    fn test_schedule_type_tag() {
        assert_eq!(default_fixed().schedule_type(), ScheduleType::Fixed);
    }
}
