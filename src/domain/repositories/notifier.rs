//! Outbound notification contract.

use crate::domain::entities::Notification;
use crate::error::AppError;
use async_trait::async_trait;

/// Delivers notifications (mail, webhooks, ...).
///
/// Always invoked from tracked background work, never on the request path.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), AppError>;
}
