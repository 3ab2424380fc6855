//! Request pipeline stages.
//!
//! Global stages, outermost first (composed once in [`crate::routes::app_router`]):
//!
//! 1. [`recover`] - converts panics into `500` + `Connection: close`
//! 2. [`trace`] - request/response span and latency log
//! 3. [`metrics`] - request/response counters
//! 4. [`rate_limit`] - per-client token bucket
//! 5. [`cors`] - trusted-origin negotiation and preflight short-circuit
//! 6. [`auth`] - bearer token → [`crate::domain::entities::Identity`]
//!
//! Route-specific stage: [`authorize`] (authenticated → activated → permission).

pub mod auth;
pub mod authorize;
pub mod cors;
pub mod metrics;
pub mod rate_limit;
pub mod recover;
pub mod trace;
