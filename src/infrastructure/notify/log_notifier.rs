//! Notifier that records deliveries in the log instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::entities::Notification;
use crate::domain::repositories::Notifier;
use crate::error::AppError;

/// Logs every notification at `info` level and counts deliveries.
#[derive(Debug, Default)]
pub struct LogNotifier {
    delivered: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: Notification) -> Result<(), AppError> {
        tracing::info!(
            recipient = %notification.recipient,
            subject = %notification.subject,
            "notification delivered"
        );
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}
