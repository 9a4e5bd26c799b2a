//! Database arguments shared by `serve` and `migrate`

use anyhow::{Context, Result};
use clap::Args;

use adboard_server::config::connect_options_from_url;
use adboard_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use adboard_server::db::{create_pool_with_options, PgConnectOptions, PgPool};
use adboard_server::DatabaseConfig;

/// Connection arguments
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides POSTGRES_* variables)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum connections in the pool
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl DatabaseArgs {
    /// Resolve connection options from the URL, or from POSTGRES_* with
    /// defaults when no URL is given.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match &self.database_url {
            Some(url) => connect_options_from_url(url).context("Invalid --database-url"),
            None => Ok(DatabaseConfig::from_env()
                .context("Invalid POSTGRES_* configuration")?
                .connect_options()),
        }
    }

    pub async fn connect(&self) -> Result<PgPool> {
        let options = self.connect_options()?;
        create_pool_with_options(options, self.max_connections)
            .await
            .context("Failed to create database pool")
    }
}
