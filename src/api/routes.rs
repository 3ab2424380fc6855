//! API route configuration.
//!
//! Every route sits behind the global pipeline (see [`crate::routes`]); routes that need
//! more than an identity add their own [`authorize`] guard as a route layer.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::api::handlers::{
    debug_vars_handler, health_handler, me_handler, share_resource_handler,
    show_resource_handler,
};
use crate::api::middleware::authorize::{self, Guard};
use crate::state::AppState;

/// Versioned API routes.
///
/// # Endpoints
///
/// - `GET  /v1/healthcheck`           - Liveness (public)
/// - `GET  /v1/me`                    - Current user (activated account)
/// - `GET  /v1/resources/{id}`        - Show a record (`resources:read`)
/// - `POST /v1/resources/{id}/share`  - Email a record to the caller (`resources:write`)
pub fn api_routes(state: &AppState) -> Router<AppState> {
    let me = Router::new()
        .route("/me", get(me_handler))
        .route_layer(middleware::from_fn_with_state(
            Guard::activated(state),
            authorize::layer,
        ));

    let read = Router::new()
        .route("/resources/{id}", get(show_resource_handler))
        .route_layer(middleware::from_fn_with_state(
            Guard::permission(state, "resources:read"),
            authorize::layer,
        ));

    let write = Router::new()
        .route("/resources/{id}/share", post(share_resource_handler))
        .route_layer(middleware::from_fn_with_state(
            Guard::permission(state, "resources:write"),
            authorize::layer,
        ));

    let v1 = Router::new()
        .route("/healthcheck", get(health_handler))
        .merge(me)
        .merge(read)
        .merge(write);

    Router::new().nest("/v1", v1)
}

/// Monitoring routes.
///
/// - `GET /debug/vars` - Request counters snapshot
pub fn debug_routes() -> Router<AppState> {
    Router::new().route("/debug/vars", get(debug_vars_handler))
}
