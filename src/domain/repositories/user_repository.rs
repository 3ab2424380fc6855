//! User lookup contract.

use crate::domain::entities::User;
use crate::error::AppError;
use async_trait::async_trait;

/// Resolves the subject of a verified token to a user record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user))` if the user exists
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the backing store fails.
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}
