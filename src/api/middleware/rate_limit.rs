//! Rate limiting middleware using the per-client token bucket.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use serde_json::json;
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor};

use crate::{error::AppError, state::AppState};

/// Admits or rejects the request through [`crate::application::services::RateLimiter`].
///
/// # Key Extraction
///
/// - `behind_proxy = false`: the socket peer address
/// - `behind_proxy = true`: `X-Forwarded-For`, `X-Real-IP`, `Forwarded`, then the peer
///   address
///
/// # Errors
///
/// Returns `429 Too Many Requests` when the client's bucket is empty, and `500` when
/// no client key can be derived from the request.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !st.rate_limiter.is_enabled() {
        return Ok(next.run(req).await);
    }

    let key = client_key(&req, st.behind_proxy)?;

    if !st.rate_limiter.admit(&key) {
        tracing::warn!(client = %key, "rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(req).await)
}

/// Derives the rate-limit key (client IP) for a request.
pub fn client_key<B>(req: &Request<B>, behind_proxy: bool) -> Result<String, AppError> {
    let extracted = if behind_proxy {
        SmartIpKeyExtractor.extract(req)
    } else {
        PeerIpKeyExtractor.extract(req)
    };

    extracted.map(|ip| ip.to_string()).map_err(|e| {
        AppError::internal(
            "Unable to determine client address",
            json!({ "reason": format!("{e:?}") }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::ConnectInfo;
    use axum::http;
    use std::net::SocketAddr;

    fn request(peer: Option<&str>, forwarded_for: Option<&str>) -> http::Request<()> {
        let mut builder = http::Request::builder().uri("/");
        if let Some(xff) = forwarded_for {
            builder = builder.header("x-forwarded-for", xff);
        }
        let mut req = builder.body(()).unwrap();
        if let Some(peer) = peer {
            let addr: SocketAddr = peer.parse().unwrap();
            req.extensions_mut().insert(ConnectInfo(addr));
        }
        req
    }

    #[test]
    fn test_peer_address_used_directly() {
        let req = request(Some("192.0.2.7:5000"), Some("203.0.113.9"));
        assert_eq!(client_key(&req, false).unwrap(), "192.0.2.7");
    }

    #[test]
    fn test_forwarded_header_trusted_behind_proxy() {
        let req = request(Some("10.0.0.1:5000"), Some("203.0.113.9"));
        assert_eq!(client_key(&req, true).unwrap(), "203.0.113.9");
    }

    #[test]
    fn test_proxy_mode_falls_back_to_peer() {
        let req = request(Some("10.0.0.1:5000"), None);
        assert_eq!(client_key(&req, true).unwrap(), "10.0.0.1");
    }

    #[test]
    fn test_missing_address_is_internal_error() {
        let req = request(None, None);
        assert!(matches!(
            client_key(&req, false),
            Err(AppError::Internal { .. })
        ));
    }
}
