//! HTTP server command
//!
//! Connects to PostgreSQL (or uses the in-memory store), bootstraps the
//! schema and serves the advertisement API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use adboard_server::db::migrations;
use adboard_server::{run_server, AppState, MemoryStore, PgStore, ServerConfig};

use super::database::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ADBOARD_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep records in process memory instead of PostgreSQL
    #[arg(long)]
    pub in_memory: bool,

    /// Skip creating the advertisement table on startup
    #[arg(long)]
    pub no_migrate: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.in_memory {
        tracing::warn!("Using in-memory store - records are lost on shutdown");
        AppState::new(MemoryStore::new())
    } else {
        let pool = args.database.connect().await?;

        if args.no_migrate {
            tracing::info!("Skipping migrations (--no-migrate)");
        } else {
            migrations::run(&pool)
                .await
                .context("Failed to run migrations")?;
        }

        AppState::new(PgStore::new(pool))
    };

    tracing::info!("Starting adboard server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
