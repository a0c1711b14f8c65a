//! Request types for the Attendance Evaluation Engine API.
//!
//! This module defines the JSON request structures for the `/evaluate`
//! endpoint and the boundary validation that turns bad fields into
//! structured errors instead of panics further down.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{DateWindow, PunchDetail, RawPunchEntry};

/// Request body for the `/evaluate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The evaluation window; schedule data is preloaded for this range only.
    pub window: WindowRequest,
    /// The raw punch entries to evaluate.
    pub entries: Vec<PunchEntryRequest>,
    /// Zero-pad numeric tokens to this width before identity matching.
    #[serde(default)]
    pub token_pad_width: Option<usize>,
}

/// Evaluation window in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowRequest {
    /// First day of the window (inclusive).
    pub start: NaiveDate,
    /// Last day of the window (inclusive).
    pub end: NaiveDate,
}

/// One token/date punch group in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchEntryRequest {
    /// The raw device token the punches were recorded under.
    pub employee_token: String,
    /// The calendar day the punches belong to.
    pub date: NaiveDate,
    /// All punch clock-times for the day (`HH:MM`), unsorted.
    #[serde(default)]
    pub all_times: Vec<String>,
    /// Individual punches with provenance.
    #[serde(default)]
    pub punches: Vec<PunchDetailRequest>,
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

/// One punch with provenance in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchDetailRequest {
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

impl EvaluateRequest {
    /// Validates field-level constraints that serde cannot express.
    ///
    /// Returns the first offending field as an
    /// [`EngineError::InvalidRequest`] with a dotted field path.
    pub fn validate(&self) -> EngineResult<()> {
        if self.window.end < self.window.start {
            return Err(EngineError::InvalidRequest {
                field: "window.end".to_string(),
                message: "end date precedes start date".to_string(),
            });
        }

        for (i, entry) in self.entries.iter().enumerate() {
            if entry.employee_token.trim().is_empty() {
                return Err(EngineError::InvalidRequest {
                    field: format!("entries[{}].employee_token", i),
                    message: "token must not be empty".to_string(),
                });
            }
            for (j, punch) in entry.punches.iter().enumerate() {
                if let Some(minute) = punch.minute_of_day {
                    if minute >= 24 * 60 {
                        return Err(EngineError::InvalidRequest {
                            field: format!("entries[{}].punches[{}].minute_of_day", i, j),
                            message: format!("{} is not a minute of day (0..1440)", minute),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

impl From<WindowRequest> for DateWindow {
    fn from(req: WindowRequest) -> Self {
        DateWindow {
            start: req.start,
            end: req.end,
        }
    }
}

impl From<PunchEntryRequest> for RawPunchEntry {
    fn from(req: PunchEntryRequest) -> Self {
        RawPunchEntry {
            employee_token: req.employee_token,
            date: req.date,
            all_times: req.all_times,
            punches: req.punches.into_iter().map(Into::into).collect(),
            source_files: req.source_files,
            employee_id: req.employee_id,
            office: req.office,
        }
    }
}

impl From<PunchDetailRequest> for PunchDetail {
    fn from(req: PunchDetailRequest) -> Self {
        PunchDetail {
            time: req.time,
            minute_of_day: req.minute_of_day,
            source: req.source,
            files: req.files,
        }
    }
}
