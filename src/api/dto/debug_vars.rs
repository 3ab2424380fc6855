//! DTO for the monitoring endpoint.

use serde::Serialize;

use crate::metrics::MetricsSnapshot;

#[derive(Debug, Serialize)]
pub struct DebugVarsResponse {
    pub version: String,
    pub timestamp: i64,
    pub background_tasks: usize,
    pub rate_limited_clients: usize,
    #[serde(flatten)]
    pub metrics: MetricsSnapshot,
}
