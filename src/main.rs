use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use catalog_api::config::{self, Config};
use catalog_api::server;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_logging(&config);
    config.print_summary();

    if let Err(e) = server::run(config).await {
        tracing::error!(error = %e, "server exited with error");
        return Err(e);
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    if config.log_format == "json" {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().flatten_event(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .init();
    }
}
