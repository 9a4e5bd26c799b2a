//! Record store traits
//!
//! Handlers open one [`StoreSession`] per request. Writes become visible
//! only after [`StoreSession::commit`]; dropping a session without
//! committing discards its writes and releases the underlying connection.

use async_trait::async_trait;

use super::StoreError;
use crate::models::{Advertisement, CreateAdvertisement};

/// Source of scoped sessions (testable)
#[async_trait]
pub trait AdvertisementStore: Send + Sync + 'static {
    /// Open a new session. Implementations may defer acquiring a
    /// connection until the session's first query.
    async fn session(&self) -> Result<Box<dyn StoreSession>, StoreError>;

    /// Check that the store can serve queries right now.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Per-request handle to the store
///
/// Any operation may fail with `Unavailable` when a lazily opened session
/// cannot get a connection.
#[async_trait]
pub trait StoreSession: Send {
    /// Insert a record; the store assigns `id` and `creation_date`.
    async fn insert(&mut self, new: &CreateAdvertisement) -> Result<Advertisement, StoreError>;

    async fn get_by_id(&mut self, id: i64) -> Result<Advertisement, StoreError>;

    /// Persist title, description and owner of an already-fetched record.
    async fn update(&mut self, ad: &Advertisement) -> Result<Advertisement, StoreError>;

    async fn delete(&mut self, id: i64) -> Result<(), StoreError>;

    /// Make this session's writes durable.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
