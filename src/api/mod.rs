//! HTTP API module for the Attendance Evaluation Engine.
//!
//! This module provides the REST API endpoints for evaluating punch
//! batches and driving the operator re-enrichment session loop.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EvaluateRequest, PunchDetailRequest, PunchEntryRequest, WindowRequest};
pub use response::{ApiError, SessionCreated};
pub use state::AppState;
