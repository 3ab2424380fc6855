//! Domain layer: identities, permissions, catalog records and the collaborator
//! contracts the request pipeline depends on.
//!
//! # Architecture
//!
//! - [`entities`] - Plain data structures ([`entities::User`], [`entities::Identity`], ...)
//! - [`repositories`] - Lookup traits implemented outside the pipeline
//!
//! The domain layer has no dependencies on the HTTP or infrastructure layers.

pub mod entities;
pub mod repositories;
