#![allow(dead_code)]

use axum::extract::ConnectInfo;
use axum::extract::connect_info::MockConnectInfo;
use axum::{Extension, Router};
use axum_test::TestServer;
use catalog_api::config::Config;
use catalog_api::domain::entities::{Resource, User};
use catalog_api::infrastructure::memory::InMemoryStore;
use catalog_api::infrastructure::notify::LogNotifier;
use catalog_api::routes::app_router;
use catalog_api::state::{AppState, Collaborators};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub const ISSUER: &str = "catalog-api";
pub const AUDIENCE: &str = "catalog-api";

/// Activated, holds `resources:read` and `resources:write`.
pub const ACTIVE_USER: i64 = 1;
/// Not activated, holds `resources:read` and `resources:write`.
pub const INACTIVE_USER: i64 = 2;
/// Activated, holds no permissions.
pub const UNPRIVILEGED_USER: i64 = 3;

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        environment: "test".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        limiter_rps: 2.0,
        limiter_burst: 4,
        limiter_enabled: false,
        limiter_sweep_interval: Duration::from_secs(60),
        limiter_stale_after: Duration::from_secs(180),
        behind_proxy: false,
        jwt_secret: "integration-test-signing-secret-0123456789".to_string(),
        jwt_issuer: ISSUER.to_string(),
        jwt_audience: AUDIENCE.to_string(),
        cors_trusted_origins: vec!["https://app.example.com".to_string()],
        shutdown_grace: Duration::from_secs(5),
        seed_file: None,
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub notifier: Arc<LogNotifier>,
}

pub async fn create_test_app(config: &Config) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    seed(&store).await;

    let notifier = Arc::new(LogNotifier::new());
    let state = AppState::new(
        config,
        Collaborators {
            users: store.clone(),
            permissions: store.clone(),
            resources: store.clone(),
            notifier: notifier.clone(),
        },
    );

    TestApp {
        state,
        store,
        notifier,
    }
}

async fn seed(store: &InMemoryStore) {
    let rw = || vec!["resources:read".to_string(), "resources:write".to_string()];

    store.insert_user(user(ACTIVE_USER, "Alice", true), rw()).await;
    store.insert_user(user(INACTIVE_USER, "Bob", false), rw()).await;
    store
        .insert_user(user(UNPRIVILEGED_USER, "Carol", true), vec![])
        .await;

    store
        .insert_resource(Resource {
            id: 1,
            title: "Casablanca".to_string(),
            year: Some(1942),
            genres: vec!["drama".to_string(), "romance".to_string()],
            version: 1,
            created_at: Utc::now(),
        })
        .await;
}

fn user(id: i64, name: &str, activated: bool) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        activated,
    }
}

/// Attaches a fixed peer address so the rate limiter can derive a client key.
pub fn with_peer(router: Router) -> Router {
    let peer = SocketAddr::from(([203, 0, 113, 7], 51000));
    router
        .layer(MockConnectInfo(peer))
        .layer(Extension(ConnectInfo(peer)))
}

pub fn test_server(app: &TestApp) -> TestServer {
    TestServer::new(with_peer(app_router(app.state.clone()))).unwrap()
}

pub fn token_for(app: &TestApp, user_id: i64) -> String {
    app.state
        .auth_service
        .issue_token(user_id, Duration::from_secs(3600))
        .unwrap()
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
