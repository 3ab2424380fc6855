//! DTOs for the current-user endpoint.

use serde::Serialize;

use crate::domain::entities::User;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}
