//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`User`] / [`Identity`] - Who is making the request
//! - [`Permissions`] - Permission codes granted to a user
//! - [`Resource`] - A catalog record
//! - [`Notification`] - Outbound message dispatched as background work

pub mod identity;
pub mod notification;
pub mod permission;
pub mod resource;

pub use identity::{Identity, User};
pub use notification::Notification;
pub use permission::Permissions;
pub use resource::Resource;
