//! Catalog lookup contract.

use crate::domain::entities::Resource;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Finds a catalog record by id, `Ok(None)` when absent.
    async fn get(&self, id: i64) -> Result<Option<Resource>, AppError>;
}
