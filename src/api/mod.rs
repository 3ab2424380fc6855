//! REST API layer for HTTP request/response handling.
//!
//! # Modules
//!
//! - [`dto`] - Response envelopes
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - The request pipeline stages
//! - [`routes`] - Route table and per-route authorization

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
