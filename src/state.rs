use std::sync::Arc;

use crate::application::services::{AuthService, AuthorizationService, RateLimiter};
use crate::background::BackgroundTasks;
use crate::config::Config;
use crate::domain::repositories::{
    Notifier, PermissionRepository, ResourceRepository, UserRepository,
};
use crate::metrics::RequestMetrics;

/// External lookups and triggers the pipeline depends on.
#[derive(Clone)]
pub struct Collaborators {
    pub users: Arc<dyn UserRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub resources: Arc<dyn ResourceRepository>,
    pub notifier: Arc<dyn Notifier>,
}

/// Shared state injected into middleware and handlers.
///
/// Holds no per-request data; request identity travels in request extensions.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub authorization: Arc<AuthorizationService>,
    pub rate_limiter: Arc<RateLimiter>,
    pub resources: Arc<dyn ResourceRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub metrics: Arc<RequestMetrics>,
    pub background: BackgroundTasks,
    pub trusted_origins: Arc<[String]>,
    pub behind_proxy: bool,
    pub environment: String,
}

impl AppState {
    pub fn new(config: &Config, collaborators: Collaborators) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                collaborators.users,
                config.token_settings(),
            )),
            authorization: Arc::new(AuthorizationService::new(collaborators.permissions)),
            rate_limiter: Arc::new(RateLimiter::new(config.limiter_config())),
            resources: collaborators.resources,
            notifier: collaborators.notifier,
            metrics: Arc::new(RequestMetrics::new()),
            background: BackgroundTasks::new(),
            trusted_origins: config.cors_trusted_origins.clone().into(),
            behind_proxy: config.behind_proxy,
            environment: config.environment.clone(),
        }
    }
}
