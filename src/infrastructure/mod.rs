//! Infrastructure layer for the pipeline's collaborators.
//!
//! The pipeline only depends on the traits in [`crate::domain::repositories`]; the
//! implementations here keep everything in process so the service runs without
//! external systems.
//!
//! # Modules
//!
//! - [`memory`] - `RwLock<HashMap>`-backed user, permission and catalog stores
//! - [`notify`] - Notifier that records deliveries in the log

pub mod memory;
pub mod notify;
