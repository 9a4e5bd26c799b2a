//! Database layer - connection pool, schema bootstrap and the record store
//!
//! # Design Principles
//!
//! - One scoped session per request, released on drop
//! - Uncommitted sessions roll back
//! - Rely on the unique index for title conflicts - no check-then-insert

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::{MemoryStore, SessionCounts};
pub use pool::{create_pool, create_pool_with_options};
pub use postgres::PgStore;
pub use store::{AdvertisementStore, StoreSession};

pub use sqlx::postgres::PgConnectOptions;
pub use sqlx::PgPool;
