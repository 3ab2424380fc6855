//! Response instrumentation middleware.

use std::time::Instant;

use axum::{
    body::HttpBody,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Counts the request, then observes the final status and body size of the response
/// without altering it.
///
/// The status seen is whatever the inner stages produced; a handler that never sets
/// one yields `200`.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let start = Instant::now();
    st.metrics.record_request();

    let response = next.run(req).await;

    st.metrics.record_response(
        response.status().as_u16(),
        response.body().size_hint().exact(),
        start.elapsed(),
    );

    response
}
