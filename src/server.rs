//! HTTP server initialization and lifecycle.
//!
//! [`run`] wires the in-process collaborators, starts the limiter sweep and binds the
//! listener. [`serve`] owns the shutdown sequence:
//!
//! 1. serve until the shutdown future resolves
//! 2. stop accepting connections and let in-flight requests finish
//! 3. wait for tracked background work to drain
//!
//! Steps 2 and 3 share a single deadline; running past it is an error.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{Instant, timeout_at};

use crate::application::services::spawn_sweeper;
use crate::background::BackgroundTasks;
use crate::config::Config;
use crate::infrastructure::memory::{InMemoryStore, Seed};
use crate::infrastructure::notify::LogNotifier;
use crate::routes::app_router;
use crate::shutdown::{self, ShutdownReason};
use crate::state::{AppState, Collaborators};

/// Runs the HTTP server with the given configuration until a shutdown signal.
///
/// # Errors
///
/// Returns an error if:
/// - The seed file cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
/// - Shutdown does not complete within the grace period
pub async fn run(config: Config) -> Result<()> {
    let store = match &config.seed_file {
        Some(path) => {
            let store = InMemoryStore::from_seed(Seed::from_file(path)?);
            tracing::info!(path = %path, "loaded seed data");
            store
        }
        None => InMemoryStore::new(),
    };
    let store = Arc::new(store);

    let state = AppState::new(
        &config,
        Collaborators {
            users: store.clone(),
            permissions: store.clone(),
            resources: store,
            notifier: Arc::new(LogNotifier::new()),
        },
    );

    let sweeper = spawn_sweeper(
        state.rate_limiter.clone(),
        config.limiter_sweep_interval,
        config.limiter_stale_after,
    );

    let background = state.background.clone();
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {}", config.listen_addr))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, env = %config.environment, "starting server");

    let result = serve(
        listener,
        app,
        background,
        shutdown::signal(),
        config.shutdown_grace,
    )
    .await;
    sweeper.abort();
    result?;

    tracing::info!(addr = %addr, "stopped server");
    Ok(())
}

/// Serves `app` on `listener` until `shutdown` resolves, then shuts down gracefully.
///
/// # Errors
///
/// Returns an error if the server fails while running, or if in-flight requests and
/// background tasks have not completed within `grace` of the shutdown trigger.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    background: BackgroundTasks,
    shutdown: F,
    grace: Duration,
) -> Result<()>
where
    F: Future<Output = ShutdownReason>,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let mut server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async {
            let _ = stop_rx.await;
        })
        .await
    });

    tokio::select! {
        reason = shutdown => {
            tracing::info!(signal = %reason, "shutting down server");
        }
        joined = &mut server => {
            joined??;
            bail!("server stopped before shutdown was requested");
        }
    }

    let deadline = Instant::now() + grace;
    // The receiver only disappears if the server task already ended.
    let _ = stop_tx.send(());

    match timeout_at(deadline, &mut server).await {
        Ok(joined) => joined??,
        Err(_) => {
            server.abort();
            bail!("in-flight requests did not complete within {grace:?}");
        }
    }

    tracing::info!(tasks = background.in_flight(), "completing background tasks");
    timeout_at(deadline, background.wait_idle())
        .await
        .map_err(|_| {
            anyhow!(
                "{} background task(s) did not complete within {grace:?}",
                background.in_flight()
            )
        })?;

    Ok(())
}
