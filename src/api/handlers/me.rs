//! Handler for the current-user endpoint.

use axum::{Extension, Json};
use serde_json::json;

use crate::api::dto::user::UserResponse;
use crate::domain::entities::Identity;
use crate::error::AppError;

/// Returns the authenticated user.
///
/// # Endpoint
///
/// `GET /v1/me` (requires an activated account)
pub async fn me_handler(
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserResponse>, AppError> {
    match identity {
        Identity::Authenticated(user) => Ok(Json(UserResponse { user })),
        Identity::Anonymous => Err(AppError::internal(
            "Anonymous identity reached an authenticated route",
            json!({}),
        )),
    }
}
