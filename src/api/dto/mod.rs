//! Data Transfer Objects for API responses.
//!
//! Successful responses wrap their payload in a named envelope
//! (`{"resource": {...}}`, `{"user": {...}}`).

pub mod debug_vars;
pub mod health;
pub mod resource;
pub mod user;
