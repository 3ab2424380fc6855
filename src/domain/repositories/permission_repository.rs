//! Permission lookup contract.

use crate::domain::entities::Permissions;
use crate::error::AppError;
use async_trait::async_trait;

/// Fetches the permission codes granted to a user.
///
/// Called on every permission-checked request; results are never cached.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Returns all permission codes for `user_id` (empty if none).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing store fails.
    async fn get_all_for_user(&self, user_id: i64) -> Result<Permissions, AppError>;
}
