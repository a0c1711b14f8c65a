//! Day evaluation logic for the Attendance Evaluation Engine.
//!
//! This module contains the pure per-day verdict computation with one
//! evaluation function per schedule variant, the weekly-exclusion override
//! step, and the batch run that wires identity reconciliation, schedule
//! resolution and aggregation together.

mod day;
mod fixed;
mod flex;
mod run;
mod shift;

pub use day::{DayVerdict, evaluate_day};
pub use fixed::evaluate_fixed;
pub use flex::evaluate_flex;
pub use run::{EngineOptions, evaluate_batch};
pub use shift::evaluate_shift;
