//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/v1/*`        - Versioned API ([`crate::api::routes::api_routes`])
//! - `/debug/vars`  - Counters for monitoring
//!
//! # Middleware
//!
//! The global pipeline is composed once, outermost first:
//!
//! - **Recover** - panic → `500` + `Connection: close`
//! - **Tracing** - structured request/response logging
//! - **Metrics** - request/response counters
//! - **Rate limiting** - per-client token bucket
//! - **CORS** - trusted origins, preflight short-circuit
//! - **Authentication** - bearer token → identity, `Vary: Authorization`

use axum::{Router, middleware};
use tower::ServiceBuilder;

use crate::api;
use crate::api::middleware::{auth, cors, metrics, rate_limit, recover, trace};
use crate::state::AppState;

/// Constructs the application router with all routes and the global pipeline.
pub fn app_router(state: AppState) -> Router {
    let routes = Router::new()
        .merge(api::routes::api_routes(&state))
        .merge(api::routes::debug_routes());

    with_pipeline(routes, state)
}

/// Wraps `routes` in the global middleware pipeline and binds the state.
///
/// Unmatched paths still pass through every stage, so a 404 is counted, rate limited
/// and carries `Vary: Authorization` like any other response.
pub fn with_pipeline(routes: Router<AppState>, state: AppState) -> Router {
    routes.with_state(state.clone()).layer(
        ServiceBuilder::new()
            .layer(recover::layer())
            .layer(trace::layer())
            .layer(middleware::from_fn_with_state(state.clone(), metrics::layer))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                rate_limit::layer,
            ))
            .layer(middleware::from_fn_with_state(state.clone(), cors::layer))
            .layer(middleware::from_fn_with_state(state, auth::layer)),
    )
}
