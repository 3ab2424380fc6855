//! Collaborator contracts consumed by the request pipeline.
//!
//! Implementations live in `crate::infrastructure`; mocks are generated with `mockall`
//! for unit tests.
//!
//! # Available Contracts
//!
//! - [`UserRepository`] - user-id → user
//! - [`PermissionRepository`] - user-id → permission set
//! - [`ResourceRepository`] - resource-id → catalog record
//! - [`Notifier`] - outbound notification trigger

pub mod notifier;
pub mod permission_repository;
pub mod resource_repository;
pub mod user_repository;

pub use notifier::Notifier;
pub use permission_repository::PermissionRepository;
pub use resource_repository::ResourceRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use notifier::MockNotifier;
#[cfg(test)]
pub use permission_repository::MockPermissionRepository;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
