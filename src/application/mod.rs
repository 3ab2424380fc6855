//! Application layer services holding the request pipeline's decision logic.
//!
//! Services consume the collaborator traits from [`crate::domain::repositories`] and
//! are wrapped by thin axum middleware in [`crate::api::middleware`].
//!
//! # Available Services
//!
//! - [`services::rate_limiter::RateLimiter`] - Per-client token-bucket admission
//! - [`services::auth_service::AuthService`] - Bearer token verification and identity resolution
//! - [`services::authorization::AuthorizationService`] - Authenticated / activated / permission layers

pub mod services;
