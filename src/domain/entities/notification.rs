//! Outbound notification.

use serde::Serialize;

/// Message handed to the notifier collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}
