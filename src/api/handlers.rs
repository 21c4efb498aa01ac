//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use crate::generator::PlanGenerator;
use crate::metrics;

/// Application state shared with handlers.
///
/// Read-only after startup; safe to share across concurrent requests
/// without locking.
#[derive(Clone)]
pub struct AppState {
    /// The plan generator (holds the model client, or its absence).
    pub generator: Arc<PlanGenerator>,
    /// Fixed model identifier reported by the health endpoint.
    pub model_name: String,
}

impl AppState {
    /// Create new app state.
    pub fn new(generator: Arc<PlanGenerator>, model_name: impl Into<String>) -> Self {
        Self {
            generator,
            model_name: model_name.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// "ok" or "error".
    pub status: &'static str,
    /// Human-readable status line.
    pub message: &'static str,
    /// The fixed model identifier.
    pub model: String,
}

/// Successful plan generation response.
#[derive(Debug, Serialize)]
pub struct ExecuteResponse {
    /// Always true on success.
    pub success: bool,
    /// The generated plan, verbatim.
    pub result: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check handler - 200 when the model client is available, 503 when
/// it failed to initialize. Always includes the model identifier.
pub async fn check(State(state): State<AppState>) -> impl IntoResponse {
    if state.generator.is_available() {
        (
            StatusCode::OK,
            Json(CheckResponse {
                status: "ok",
                message: "backend is running",
                model: state.model_name,
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(CheckResponse {
                status: "error",
                message: "backend is running, but AI model failed to initialize.",
                model: state.model_name,
            }),
        )
    }
}

/// Execute handler - validates the request and proxies to the generator.
///
/// Checks run strictly in order: model availability, JSON shape, `query`
/// field. Validation failures never reach the generator and are not logged
/// as errors.
pub async fn execute(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    if !state.generator.is_available() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "AI service not initialized. Check API key configuration.",
            )),
        )
            .into_response();
    }

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Invalid or missing JSON payload.")),
            )
                .into_response();
        }
    };

    // `query` must be present, a string, and not just whitespace.
    let query = match payload.get("query").and_then(Value::as_str) {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "Missing or empty \"query\" field in the request.",
                )),
            )
                .into_response();
        }
    };

    let start = Instant::now();

    match state.generator.generate(query).await {
        Ok(result) => {
            metrics::record_plan_latency(start);
            metrics::inc_plans_generated();

            (
                StatusCode::OK,
                Json(ExecuteResponse {
                    success: true,
                    result,
                }),
            )
                .into_response()
        }
        Err(e) if e.is_provider() => {
            error!("Gemini API error: {}", e);
            metrics::inc_plan_failures();

            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(format!(
                    "AI Service Unavailable or request error: {}",
                    e
                ))),
            )
                .into_response()
        }
        Err(e) => {
            error!("Internal server error: {}", e);
            metrics::inc_plan_failures();

            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "An unexpected internal server error occurred.",
                )),
            )
                .into_response()
        }
    }
}
