//! # Catalog API
//!
//! HTTP service exposing a resource catalog behind a layered request pipeline, built
//! with Axum.
//!
//! ## Architecture
//!
//! The crate keeps the same layer separation throughout:
//!
//! - **Domain Layer** ([`domain`]) - Entities and collaborator traits
//! - **Application Layer** ([`application`]) - Rate limiting, token verification and
//!   authorization decisions
//! - **Infrastructure Layer** ([`infrastructure`]) - In-process collaborator implementations
//! - **API Layer** ([`api`]) - Middleware stages, handlers, DTOs and routes
//!
//! ## Request Pipeline
//!
//! Every request passes, in order: panic recovery, tracing, metrics, rate limiting,
//! CORS, authentication and (per route) authorization. See [`routes`].
//!
//! ## Features
//!
//! - Per-client token-bucket rate limiting with periodic eviction
//! - HS256 bearer tokens with issuer/audience/expiry validation
//! - Authenticated → activated → permission authorization chain
//! - Panic isolation and request counters
//! - Graceful shutdown that drains in-flight requests and background work
//!
//! ## Quick Start
//!
//! ```bash
//! export JWT_SECRET="a-long-random-secret-of-at-least-32-bytes"
//! export SEED_FILE="seed.json"  # Optional
//!
//! cargo run
//! cargo run --bin admin -- token issue --user 1
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod background;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics;
pub mod state;

pub mod config;
pub mod server;
pub mod shutdown;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, AuthorizationService, RateLimiter, RateLimiterConfig, Requirement,
    };
    pub use crate::background::BackgroundTasks;
    pub use crate::domain::entities::{Identity, Permissions, Resource, User};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, Collaborators};
}
