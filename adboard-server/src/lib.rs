//! adboard-server: HTTP server for advertisement records
//!
//! Validates inbound JSON, persists advertisements in PostgreSQL through a
//! per-request scoped session, and maps store failures to HTTP statuses.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{AdvertisementStore, MemoryStore, PgStore, StoreError, StoreSession};
pub use http::{build_router, run_server, AppState, ServerConfig};
