//! Attendance Evaluation & Schedule Resolution Engine
//!
//! This crate evaluates raw biometric punch data against employee work
//! schedules (fixed, flexible and shift-based), resolving which schedule
//! governs each employee-day, reconciling device tokens to canonical
//! employees, applying weekly exclusion overrides, and aggregating per-day
//! verdicts into per-employee summaries.

#![warn(missing_docs)]

pub mod aggregate;
pub mod api;
pub mod error;
pub mod evaluate;
pub mod identity;
pub mod models;
pub mod resolve;
pub mod session;
pub mod store;
