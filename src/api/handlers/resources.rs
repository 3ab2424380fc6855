//! Handlers for catalog endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::resource::{AcceptedResponse, ResourceResponse};
use crate::api::handlers::read_id_param;
use crate::domain::entities::{Identity, Notification, Resource};
use crate::error::AppError;
use crate::state::AppState;

async fn find_resource(state: &AppState, raw_id: &str) -> Result<Resource, AppError> {
    let id = read_id_param(raw_id)?;
    state.resources.get(id).await?.ok_or_else(|| {
        AppError::not_found(
            "The requested resource could not be found",
            json!({ "id": id }),
        )
    })
}

/// Shows a single catalog record.
///
/// # Endpoint
///
/// `GET /v1/resources/{id}` (requires `resources:read`)
///
/// # Errors
///
/// Returns 404 if the id is not a positive integer or no record exists.
pub async fn show_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResourceResponse>, AppError> {
    let resource = find_resource(&state, &id).await?;
    Ok(Json(ResourceResponse { resource }))
}

/// Sends the record to the requesting user's email address.
///
/// The notification is dispatched as tracked background work, so the response does
/// not wait for delivery and shutdown waits for it to finish.
///
/// # Endpoint
///
/// `POST /v1/resources/{id}/share` (requires `resources:write`)
///
/// # Errors
///
/// Returns 404 if the id is not a positive integer or no record exists.
pub async fn share_resource_handler(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AppError> {
    let resource = find_resource(&state, &id).await?;
    let user = identity.user().cloned().ok_or_else(|| {
        AppError::internal("Anonymous identity reached an authenticated route", json!({}))
    })?;

    let notification = Notification {
        recipient: user.email,
        subject: format!("Shared with you: {}", resource.title),
        body: format!("{} (catalog id {})", resource.title, resource.id),
    };

    let notifier = state.notifier.clone();
    state.background.spawn("share_notification", async move {
        if let Err(e) = notifier.notify(notification).await {
            tracing::error!(error = %e, resource_id = resource.id, "failed to deliver notification");
        }
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(AcceptedResponse {
            message: "notification scheduled".to_string(),
        }),
    ))
}
