//! HTTP request handlers for the Attendance Evaluation Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post, put},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::evaluate::{EngineOptions, evaluate_batch};
use crate::models::RawPunchEntry;
use crate::session::TokenSession;

use super::request::EvaluateRequest;
use super::response::{ApiError, ApiErrorResponse, SessionCreated};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/evaluate", post(evaluate_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/:id", get(read_session_handler))
        .route("/sessions/:id/tokens/:token", put(put_token_handler))
        .route("/sessions/:id/touch", post(touch_session_handler))
        .with_state(state)
}

/// Handler for POST /evaluate endpoint.
///
/// Accepts a batch of raw punch entries plus an evaluation window and
/// returns the per-day verdicts, per-employee summaries and pinned token
/// resolutions.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluateRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // Get the body text which contains the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    // Check if it's a missing field error
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    if let Err(err) = request.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Request validation failed"
        );
        let api_error: ApiErrorResponse = err.into();
        return api_error.into_response();
    }

    // Convert request types to domain types
    let options = EngineOptions {
        token_pad_width: request
            .token_pad_width
            .or(state.options().token_pad_width),
    };
    let window = request.window.into();
    let entries: Vec<RawPunchEntry> = request.entries.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    match evaluate_batch(
        state.schedules(),
        state.directory(),
        state.mappings(),
        &entries,
        window,
        &options,
    ) {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                entries = entries.len(),
                employees = outcome.per_employee.len(),
                duration_us = duration.as_micros(),
                "Evaluation completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(outcome),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Evaluation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            api_error.into_response()
        }
    }
}

/// Handler for POST /sessions endpoint.
async fn create_session_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session_id = state.sessions().create();
    info!(session_id = %session_id, "Session created");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// Handler for GET /sessions/:id endpoint.
async fn read_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.sessions().read(&id) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for PUT /sessions/:id/tokens/:token endpoint.
///
/// Replaces the evaluated state for one token inside the session
/// (last-write-wins).
async fn put_token_handler(
    State(state): State<AppState>,
    Path((id, token)): Path<(String, String)>,
    Json(body): Json<TokenSession>,
) -> impl IntoResponse {
    match state.sessions().put_token(&id, &token, body) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for POST /sessions/:id/touch endpoint.
async fn touch_session_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.sessions().touch(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        DirectoryEntry, EvaluationOutcome, IdentityStatus, RawScheduleFields, ScheduleType,
        WorkSchedule,
    };
    use crate::session::SessionState;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::NaiveDate;
    use tower::ServiceExt;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_test_state() -> AppState {
        let store = MemoryStore {
            schedules: vec![WorkSchedule {
                employee_id: "emp_001".to_string(),
                schedule_type: ScheduleType::Fixed,
                fields: RawScheduleFields {
                    start_time: Some("08:00".to_string()),
                    end_time: Some("17:00".to_string()),
                    break_minutes: Some(60),
                    grace_minutes: Some(10),
                    ..RawScheduleFields::default()
                },
                effective_from: make_date("2026-01-01"),
                effective_to: None,
            }],
            directory: vec![DirectoryEntry {
                id: "emp_001".to_string(),
                full_name: "Reyes, Ana".to_string(),
                bio_field: "0007,E-2".to_string(),
                office: Some("Main".to_string()),
                updated_at: make_date("2026-01-01").and_hms_opt(8, 0, 0).unwrap(),
            }],
            ..MemoryStore::default()
        };
        AppState::in_memory(store, EngineOptions::default())
    }

    fn valid_body() -> String {
        r#"{
            "window": { "start": "2026-01-01", "end": "2026-01-31" },
            "entries": [
                {
                    "employee_token": "0007",
                    "date": "2026-01-12",
                    "all_times": ["08:11", "17:02"]
                }
            ]
        }"#
        .to_string()
    }

    async fn send(router: Router, method: &str, uri: &str, body: Body) -> axum::response::Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_api_001_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/evaluate", Body::from(valid_body())).await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let outcome: EvaluationOutcome = serde_json::from_slice(&body).unwrap();

        assert_eq!(outcome.per_day.len(), 1);
        assert_eq!(outcome.per_day[0].employee_id.as_deref(), Some("emp_001"));
        assert!(outcome.per_day[0].is_late);
        assert_eq!(outcome.per_day[0].late_minutes, 1);
        assert_eq!(outcome.identities.len(), 1);
        assert_eq!(outcome.identities[0].status, IdentityStatus::Matched);
    }

    #[tokio::test]
    async fn test_api_002_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let response = send(router, "POST", "/evaluate", Body::from("{invalid json")).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_api_003_missing_window_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{ "entries": [] }"#;
        let response = send(router, "POST", "/evaluate", Body::from(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert!(
            error.message.contains("missing field")
                || error.message.to_lowercase().contains("window"),
            "Expected error message to mention missing field or window, got: {}",
            error.message
        );
    }

    #[tokio::test]
    async fn test_api_004_inverted_window_returns_400() {
        let router = create_router(create_test_state());
        let body = r#"{
            "window": { "start": "2026-01-31", "end": "2026-01-01" },
            "entries": []
        }"#;
        let response = send(router, "POST", "/evaluate", Body::from(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_deref(), Some("window.end"));
    }

    #[tokio::test]
    async fn test_api_005_session_lifecycle() {
        let state = create_test_state();

        let response = send(
            create_router(state.clone()),
            "POST",
            "/sessions",
            Body::empty(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let created: SessionCreated = serde_json::from_slice(&body).unwrap();

        let token_body = serde_json::json!({
            "identity": {
                "token": "0007",
                "normalized_token": "0007",
                "status": "matched",
                "employee_id": "emp_001",
                "display_name": "Reyes, Ana",
                "candidates": []
            },
            "days": []
        });
        let response = send(
            create_router(state.clone()),
            "PUT",
            &format!("/sessions/{}/tokens/0007", created.session_id),
            Body::from(token_body.to_string()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(
            create_router(state.clone()),
            "GET",
            &format!("/sessions/{}", created.session_id),
            Body::empty(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let session: SessionState = serde_json::from_slice(&body).unwrap();
        assert!(session.tokens.contains_key("0007"));

        let response = send(
            create_router(state),
            "POST",
            &format!("/sessions/{}/touch", created.session_id),
            Body::empty(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_api_006_unknown_session_returns_404() {
        let router = create_router(create_test_state());
        let response = send(router, "GET", "/sessions/not-a-session", Body::empty()).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "SESSION_NOT_FOUND");
    }
}
