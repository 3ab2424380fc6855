//! Request pipeline services.

pub mod auth_service;
pub mod authorization;
pub mod rate_limiter;

pub use auth_service::{AuthService, Claims, TokenSettings};
pub use authorization::{AuthorizationService, Requirement};
pub use rate_limiter::{ClientBucket, RateLimiter, RateLimiterConfig, spawn_sweeper};
