//! DTOs for catalog endpoints.

use serde::Serialize;

use crate::domain::entities::Resource;

#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub resource: Resource,
}

/// Acknowledgement for work handed off to the background.
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub message: String,
}
