//! Error types for the Attendance Evaluation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Resolution gaps (missing schedules, unknown tokens, ambiguous identities)
//! are deliberately NOT errors: they degrade to markers in the evaluation
//! output so a single bad row never aborts a batch. Errors here are reserved
//! for request-boundary validation failures and collaborator outages.

use thiserror::Error;

/// The main error type for the Attendance Evaluation Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidRequest {
///     field: "window.end".to_string(),
///     message: "end date precedes start date".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid request field 'window.end': end date precedes start date"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A request field failed validation at the API boundary.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field, dotted-path style (e.g. `entries[3].punches[0].minute_of_day`).
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The persistence collaborator failed mid-run.
    ///
    /// Fatal for the whole evaluation run: partial schedule data would
    /// silently corrupt every subsequent verdict, so the engine never
    /// retries internally and never degrades this to a marker.
    #[error("Persistence collaborator unavailable: {message}")]
    StoreUnavailable {
        /// A description of the underlying failure.
        message: String,
    },

    /// A session cache lookup referenced an unknown or expired session.
    #[error("Session not found: {id}")]
    SessionNotFound {
        /// The session identifier that was not found.
        id: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
