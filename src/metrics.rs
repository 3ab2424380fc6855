//! Request/response counters.
//!
//! [`RequestMetrics`] is written by the metrics middleware and read by the
//! `/debug/vars` handler. Each update is mirrored into the `metrics` facade so an
//! installed exporter picks it up as well.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Default)]
pub struct RequestMetrics {
    requests_received: AtomicU64,
    responses_sent: AtomicU64,
    processing_time_us: AtomicU64,
    response_bytes: AtomicU64,
    by_status: Mutex<BTreeMap<u16, u64>>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub total_requests_received: u64,
    pub total_responses_sent: u64,
    pub total_processing_time_us: u64,
    pub total_response_bytes: u64,
    pub total_responses_sent_by_status: BTreeMap<u16, u64>,
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("http_requests_received_total").increment(1);
    }

    /// Records a finished response. `bytes` is the body size when known.
    pub fn record_response(&self, status: u16, bytes: Option<u64>, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

        self.responses_sent.fetch_add(1, Ordering::Relaxed);
        self.processing_time_us.fetch_add(micros, Ordering::Relaxed);
        if let Some(bytes) = bytes {
            self.response_bytes.fetch_add(bytes, Ordering::Relaxed);
        }
        *self
            .by_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(status)
            .or_default() += 1;

        metrics::counter!("http_responses_sent_total", "status" => status.to_string()).increment(1);
        metrics::counter!("http_processing_time_us_total").increment(micros);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests_received: self.requests_received.load(Ordering::Relaxed),
            total_responses_sent: self.responses_sent.load(Ordering::Relaxed),
            total_processing_time_us: self.processing_time_us.load(Ordering::Relaxed),
            total_response_bytes: self.response_bytes.load(Ordering::Relaxed),
            total_responses_sent_by_status: self
                .by_status
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }
}
