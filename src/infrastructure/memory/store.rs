//! Process-local store backing the user, permission and catalog lookups.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::seed::Seed;
use crate::domain::entities::{Permissions, Resource, User};
use crate::domain::repositories::{PermissionRepository, ResourceRepository, UserRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<i64, User>>,
    permissions: RwLock<HashMap<i64, Vec<String>>>,
    resources: RwLock<HashMap<i64, Resource>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        let mut users = HashMap::new();
        let mut permissions = HashMap::new();
        for entry in seed.users {
            permissions.insert(entry.user.id, entry.permissions);
            users.insert(entry.user.id, entry.user);
        }

        let resources = seed.resources.into_iter().map(|r| (r.id, r)).collect();

        Self {
            users: RwLock::new(users),
            permissions: RwLock::new(permissions),
            resources: RwLock::new(resources),
        }
    }

    pub async fn insert_user(&self, user: User, codes: Vec<String>) {
        self.permissions.write().await.insert(user.id, codes);
        self.users.write().await.insert(user.id, user);
    }

    pub async fn insert_resource(&self, resource: Resource) {
        self.resources.write().await.insert(resource.id, resource);
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl PermissionRepository for InMemoryStore {
    async fn get_all_for_user(&self, user_id: i64) -> Result<Permissions, AppError> {
        Ok(self
            .permissions
            .read()
            .await
            .get(&user_id)
            .map(|codes| Permissions::new(codes.iter().cloned()))
            .unwrap_or_default())
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn get(&self, id: i64) -> Result<Option<Resource>, AppError> {
        Ok(self.resources.read().await.get(&id).cloned())
    }
}
