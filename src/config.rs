//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Nothing here can change while the server is running.
//!
//! ## Required Variables
//!
//! - `JWT_SECRET` - HMAC secret used to verify bearer tokens
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:4000`)
//! - `APP_ENV` - Environment name (default: `development`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `LIMITER_RPS` / `LIMITER_BURST` / `LIMITER_ENABLED` - Token bucket (default: 2 / 4 / true)
//! - `LIMITER_SWEEP_INTERVAL_SECS` - Eviction sweep interval (default: 60)
//! - `LIMITER_STALE_AFTER_SECS` - Evict clients unseen for this long (default: 180)
//! - `BEHIND_PROXY` - Derive client keys from forwarding headers (default: false)
//! - `JWT_ISSUER` / `JWT_AUDIENCE` - Trusted issuer and audience (default: `catalog-api`)
//! - `CORS_TRUSTED_ORIGINS` - Space-separated list of trusted origins
//! - `SHUTDOWN_GRACE_SECS` - Bounded shutdown deadline (default: 30)
//! - `SEED_FILE` - JSON fixture for the in-memory collaborators

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::application::services::{RateLimiterConfig, TokenSettings};

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,

    // ── Rate limiter ────────────────────────────────────────────────────────
    pub limiter_rps: f64,
    pub limiter_burst: u32,
    pub limiter_enabled: bool,
    pub limiter_sweep_interval: Duration,
    pub limiter_stale_after: Duration,
    /// When true, client keys come from X-Forwarded-For / X-Real-IP / Forwarded.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,

    // ── Tokens ──────────────────────────────────────────────────────────────
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub jwt_audience: String,

    pub cors_trusted_origins: Vec<String>,
    pub shutdown_grace: Duration,
    pub seed_file: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `JWT_SECRET` is missing or a numeric variable does not parse.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:4000".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let limiter_rps = parse_var("LIMITER_RPS", 2.0)?;
        let limiter_burst = parse_var("LIMITER_BURST", 4)?;
        let limiter_enabled = flag_var("LIMITER_ENABLED", true);
        let limiter_sweep_interval =
            Duration::from_secs(parse_var("LIMITER_SWEEP_INTERVAL_SECS", 60)?);
        let limiter_stale_after = Duration::from_secs(parse_var("LIMITER_STALE_AFTER_SECS", 180)?);
        let behind_proxy = flag_var("BEHIND_PROXY", false);

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let jwt_issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "catalog-api".to_string());
        let jwt_audience = env::var("JWT_AUDIENCE").unwrap_or_else(|_| "catalog-api".to_string());

        let cors_trusted_origins = env::var("CORS_TRUSTED_ORIGINS")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        let shutdown_grace = Duration::from_secs(parse_var("SHUTDOWN_GRACE_SECS", 30)?);
        let seed_file = env::var("SEED_FILE").ok().filter(|v| !v.is_empty());

        Ok(Self {
            listen_addr,
            environment,
            log_level,
            log_format,
            limiter_rps,
            limiter_burst,
            limiter_enabled,
            limiter_sweep_interval,
            limiter_stale_after,
            behind_proxy,
            jwt_secret,
            jwt_issuer,
            jwt_audience,
            cors_trusted_origins,
            shutdown_grace,
            seed_file,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `limiter_rps` is not a positive finite number or `limiter_burst` is 0
    /// - a duration is zero, or the stale window is shorter than the sweep interval
    /// - `jwt_secret`, `jwt_issuer` or `jwt_audience` is empty
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    pub fn validate(&self) -> Result<()> {
        if !self.limiter_rps.is_finite() || self.limiter_rps <= 0.0 {
            anyhow::bail!(
                "LIMITER_RPS must be a positive number, got {}",
                self.limiter_rps
            );
        }

        if self.limiter_burst == 0 {
            anyhow::bail!("LIMITER_BURST must be at least 1");
        }

        if self.limiter_sweep_interval.is_zero() {
            anyhow::bail!("LIMITER_SWEEP_INTERVAL_SECS must be greater than 0");
        }

        if self.limiter_stale_after < self.limiter_sweep_interval {
            anyhow::bail!(
                "LIMITER_STALE_AFTER_SECS ({}) must not be shorter than LIMITER_SWEEP_INTERVAL_SECS ({})",
                self.limiter_stale_after.as_secs(),
                self.limiter_sweep_interval.as_secs()
            );
        }

        if self.shutdown_grace.is_zero() {
            anyhow::bail!("SHUTDOWN_GRACE_SECS must be greater than 0");
        }

        if self.jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        if self.jwt_issuer.is_empty() || self.jwt_audience.is_empty() {
            anyhow::bail!("JWT_ISSUER and JWT_AUDIENCE must not be empty");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    pub fn limiter_config(&self) -> RateLimiterConfig {
        RateLimiterConfig {
            refill_rate: self.limiter_rps,
            burst_capacity: self.limiter_burst,
            enabled: self.limiter_enabled,
        }
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.jwt_secret.clone(),
            issuer: self.jwt_issuer.clone(),
            audience: self.jwt_audience.clone(),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Environment: {}", self.environment);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);

        if self.limiter_enabled {
            tracing::info!(
                "  Rate limiter: {} rps, burst {}, behind proxy: {}",
                self.limiter_rps,
                self.limiter_burst,
                self.behind_proxy
            );
        } else {
            tracing::info!("  Rate limiter: disabled");
        }

        tracing::info!("  JWT secret: {}", mask_secret(&self.jwt_secret));
        tracing::info!("  JWT issuer/audience: {} / {}", self.jwt_issuer, self.jwt_audience);
        tracing::info!("  Trusted origins: {:?}", self.cors_trusted_origins);
        tracing::info!("  Shutdown grace: {}s", self.shutdown_grace.as_secs());
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name} has an invalid value: '{v}'")),
        Err(_) => Ok(default),
    }
}

fn flag_var(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

/// Masks a secret for logging, keeping only its length.
fn mask_secret(secret: &str) -> String {
    format!("*** ({} bytes)", secret.len())
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
