//! Handler exposing the request counters to monitoring.

use axum::{Json, extract::State};
use chrono::Utc;

use crate::api::dto::debug_vars::DebugVarsResponse;
use crate::state::AppState;

/// Returns a read-only snapshot of the pipeline counters.
///
/// # Endpoint
///
/// `GET /debug/vars`
pub async fn debug_vars_handler(State(state): State<AppState>) -> Json<DebugVarsResponse> {
    Json(DebugVarsResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().timestamp(),
        background_tasks: state.background.in_flight(),
        rate_limited_clients: state.rate_limiter.len(),
        metrics: state.metrics.snapshot(),
    })
}
