//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{error::AppError, state::AppState};

/// Resolves the request's [`crate::domain::entities::Identity`] and attaches it to the
/// request extensions.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. No `Authorization` header → anonymous identity, request continues
/// 2. Header present → token verified and subject looked up
/// 3. Identity inserted into request extensions for later stages and handlers
///
/// # Errors
///
/// Returns `401 Unauthorized` (`invalid_authentication_token`) for every credential
/// failure and `500` when the user lookup fails. Downstream stages are not called.
///
/// Every response carries `Vary: Authorization`, whatever the outcome.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned));

    let result = match authorization {
        None => st.auth_service.authenticate(None).await,
        Some(Ok(value)) => st.auth_service.authenticate(Some(&value)).await,
        Some(Err(_)) => Err(AppError::InvalidCredential),
    };

    let mut response = match result {
        Ok(identity) => {
            req.extensions_mut().insert(identity);
            next.run(req).await
        }
        Err(e) => e.into_response(),
    };

    response
        .headers_mut()
        .append(header::VARY, HeaderValue::from_static("Authorization"));
    response
}
