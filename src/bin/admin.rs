//! CLI administration tool for catalog-api.
//!
//! Mints and inspects bearer tokens signed with the service's configured secret,
//! issuer and audience.
//!
//! # Usage
//!
//! ```bash
//! # Issue a token for user 1, valid for 24 hours
//! cargo run --bin admin -- token issue --user 1
//!
//! # Issue a short-lived token
//! cargo run --bin admin -- token issue --user 1 --ttl-hours 1
//!
//! # Verify a token and print its claims
//! cargo run --bin admin -- token inspect eyJhbGciOi...
//! ```
//!
//! # Environment Variables
//!
//! - `JWT_SECRET` (required), `JWT_ISSUER`, `JWT_AUDIENCE`: same as the server

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::DateTime;
use clap::{Parser, Subcommand};
use colored::*;

use catalog_api::application::services::AuthService;
use catalog_api::config;
use catalog_api::infrastructure::memory::InMemoryStore;

/// CLI tool for managing catalog-api.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage bearer tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue a signed token for a user
    Issue {
        /// User ID placed in the `sub` claim
        #[arg(short, long)]
        user: i64,

        /// Token lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: u64,
    },

    /// Verify a token and print its claims
    Inspect {
        /// Raw token (without the `Bearer ` prefix)
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    // Token operations never look users up.
    let auth = AuthService::new(Arc::new(InMemoryStore::new()), config.token_settings());

    match cli.command {
        Commands::Token { action } => match action {
            TokenAction::Issue { user, ttl_hours } => issue_token(&auth, user, ttl_hours)?,
            TokenAction::Inspect { token } => inspect_token(&auth, &token),
        },
    }

    Ok(())
}

fn issue_token(auth: &AuthService<InMemoryStore>, user: i64, ttl_hours: u64) -> Result<()> {
    if user <= 0 {
        anyhow::bail!("user id must be a positive integer");
    }

    let ttl = Duration::from_secs(ttl_hours * 3600);
    let token = auth
        .issue_token(user, ttl)
        .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;

    println!("{}", "Token issued".bright_blue().bold());
    println!();
    println!("  User:     {}", user.to_string().cyan());
    println!("  Issuer:   {}", auth.settings().issuer.cyan());
    println!("  Audience: {}", auth.settings().audience.cyan());
    println!("  Expires:  in {} hour(s)", ttl_hours.to_string().cyan());
    println!();
    println!("{}", token.bright_yellow().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();

    Ok(())
}

fn inspect_token(auth: &AuthService<InMemoryStore>, token: &str) {
    match auth.verify(token) {
        Ok(claims) => {
            println!("{}", "Token is valid".green().bold());
            println!();
            println!("  Subject:    {}", claims.sub.cyan());
            println!("  Issuer:     {}", claims.iss.cyan());
            println!("  Audience:   {}", claims.aud.join(", ").cyan());
            if let Some(nbf) = claims.nbf {
                println!("  Not before: {}", format_timestamp(nbf).bright_black());
            }
            println!("  Expires:    {}", format_timestamp(claims.exp).bright_black());
        }
        Err(_) => {
            println!(
                "{}",
                "Token rejected: bad signature, expired, or wrong issuer/audience".red()
            );
        }
    }
}

fn format_timestamp(secs: i64) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| secs.to_string())
}
