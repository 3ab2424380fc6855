//! Route-level authorization middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::application::services::{AuthorizationService, Requirement};
use crate::domain::entities::Identity;
use crate::error::AppError;
use crate::state::AppState;

/// State of one authorization layer: the requirement it enforces.
///
/// # Example
///
/// ```rust,ignore
/// Router::new()
///     .route("/v1/resources/{id}", get(show_resource_handler))
///     .route_layer(middleware::from_fn_with_state(
///         Guard::permission(&state, "resources:read"),
///         authorize::layer,
///     ));
/// ```
#[derive(Clone)]
pub struct Guard {
    authorization: Arc<AuthorizationService>,
    requirement: Requirement,
}

impl Guard {
    pub fn new(state: &AppState, requirement: Requirement) -> Self {
        Self {
            authorization: state.authorization.clone(),
            requirement,
        }
    }

    pub fn authenticated(state: &AppState) -> Self {
        Self::new(state, Requirement::Authenticated)
    }

    pub fn activated(state: &AppState) -> Self {
        Self::new(state, Requirement::Activated)
    }

    pub fn permission(state: &AppState, code: &'static str) -> Self {
        Self::new(state, Requirement::Permission(code))
    }
}

/// Enforces the guard's requirement against the identity set by the auth stage.
///
/// A request that never passed the auth stage is treated as anonymous.
pub async fn layer(
    State(guard): State<Guard>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = req
        .extensions()
        .get::<Identity>()
        .cloned()
        .unwrap_or_default();

    guard
        .authorization
        .authorize(&identity, &guard.requirement)
        .await?;

    Ok(next.run(req).await)
}
