//! Database connection settings
//!
//! Environment variables (all optional):
//!   POSTGRES_HOST      (default: 127.0.0.1)
//!   POSTGRES_PORT      (default: 5431)
//!   POSTGRES_USER      (default: postgres)
//!   POSTGRES_PASSWORD  (default: 123456)
//!   POSTGRES_DB        (default: flask_app)

use std::env;

use sqlx::postgres::PgConnectOptions;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5431;
const DEFAULT_USER: &str = "postgres";
const DEFAULT_PASSWORD: &str = "123456";
const DEFAULT_DATABASE: &str = "flask_app";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid POSTGRES_PORT '{value}': {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },

    #[error("invalid database URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),
}

/// PostgreSQL connection fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            user: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Read `POSTGRES_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults for
    /// missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("POSTGRES_PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => defaults.port,
        };

        Ok(Self {
            host: lookup("POSTGRES_HOST").unwrap_or(defaults.host),
            port,
            user: lookup("POSTGRES_USER").unwrap_or(defaults.user),
            password: lookup("POSTGRES_PASSWORD").unwrap_or(defaults.password),
            database: lookup("POSTGRES_DB").unwrap_or(defaults.database),
        })
    }

    /// Connection options for sqlx. Fields are passed individually so the
    /// password never needs URL escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Parse a full `postgres://` URL, used when `DATABASE_URL` is set.
pub fn connect_options_from_url(url: &str) -> Result<PgConnectOptions, ConfigError> {
    url.parse().map_err(ConfigError::InvalidUrl)
}
