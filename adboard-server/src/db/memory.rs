//! In-process record store for tests and `--in-memory` serving
//!
//! Sessions are serialized: each holds the table lock for its lifetime and
//! works on a staged copy that replaces the table on commit. Ids come from
//! a store-wide counter so they are never reused, even across rollbacks.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::store::{AdvertisementStore, StoreSession};
use super::StoreError;
use crate::models::{Advertisement, CreateAdvertisement};

#[derive(Debug, Clone, Default)]
struct Table {
    rows: BTreeMap<i64, Advertisement>,
}

impl Table {
    fn title_taken(&self, title: &str, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|row| row.title == title && Some(row.id) != except)
    }
}

#[derive(Debug, Default)]
struct Counters {
    opened: AtomicUsize,
    released: AtomicUsize,
    committed: AtomicUsize,
}

/// Snapshot of session bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounts {
    pub opened: usize,
    pub released: usize,
    pub committed: usize,
}

/// Store keeping records in memory
#[derive(Clone, Default)]
pub struct MemoryStore {
    table: Arc<Mutex<Table>>,
    sequence: Arc<AtomicI64>,
    counters: Arc<Counters>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed records
    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn session_counts(&self) -> SessionCounts {
        SessionCounts {
            opened: self.counters.opened.load(Ordering::SeqCst),
            released: self.counters.released.load(Ordering::SeqCst),
            committed: self.counters.committed.load(Ordering::SeqCst),
        }
    }
}

#[async_trait]
impl AdvertisementStore for MemoryStore {
    async fn session(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        let guard = self.table.clone().lock_owned().await;
        let staged = guard.clone();
        self.counters.opened.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(MemorySession {
            guard,
            staged,
            sequence: Arc::clone(&self.sequence),
            counters: Arc::clone(&self.counters),
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Session over the in-memory table
pub struct MemorySession {
    guard: OwnedMutexGuard<Table>,
    staged: Table,
    sequence: Arc<AtomicI64>,
    counters: Arc<Counters>,
}

#[async_trait]
impl StoreSession for MemorySession {
    async fn insert(&mut self, new: &CreateAdvertisement) -> Result<Advertisement, StoreError> {
        if self.staged.title_taken(new.title.as_str(), None) {
            return Err(StoreError::DuplicateKey);
        }

        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let ad = Advertisement {
            id,
            title: new.title.as_str().to_owned(),
            description: new.description.clone(),
            owner: new.owner.clone(),
            creation_date: Utc::now().naive_utc(),
        };
        self.staged.rows.insert(id, ad.clone());

        tracing::debug!(id, "inserted advertisement (memory)");
        Ok(ad)
    }

    async fn get_by_id(&mut self, id: i64) -> Result<Advertisement, StoreError> {
        self.staged
            .rows
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    async fn update(&mut self, ad: &Advertisement) -> Result<Advertisement, StoreError> {
        if self.staged.title_taken(&ad.title, Some(ad.id)) {
            return Err(StoreError::DuplicateKey);
        }

        let row = self
            .staged
            .rows
            .get_mut(&ad.id)
            .ok_or(StoreError::NotFound { id: ad.id })?;
        row.title = ad.title.clone();
        row.description = ad.description.clone();
        row.owner = ad.owner.clone();

        Ok(row.clone())
    }

    async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.staged
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut session = self;
        let staged = std::mem::take(&mut session.staged);
        *session.guard = staged;
        session.counters.committed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        self.counters.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdTitle;

    fn new_ad(title: &str) -> CreateAdvertisement {
        CreateAdvertisement {
            title: AdTitle::new(title).unwrap(),
            description: "Good condition".into(),
            owner: "alice".into(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = MemoryStore::new();
        let mut session = store.session().await.unwrap();

        let first = session.insert(&new_ad("Sell bike")).await.unwrap();
        let second = session.insert(&new_ad("Sell car!")).await.unwrap();
        session.commit().await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn duplicate_title_is_rejected() {
        let store = MemoryStore::new();
        let mut session = store.session().await.unwrap();
        session.insert(&new_ad("Sell bike")).await.unwrap();

        let err = session.insert(&new_ad("Sell bike")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
    }

    #[tokio::test]
    async fn dropped_session_rolls_back() {
        let store = MemoryStore::new();
        {
            let mut session = store.session().await.unwrap();
            session.insert(&new_ad("Sell bike")).await.unwrap();
        }

        assert!(store.is_empty().await);
        assert_eq!(
            store.session_counts(),
            SessionCounts {
                opened: 1,
                released: 1,
                committed: 0
            }
        );
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let store = MemoryStore::new();

        let mut session = store.session().await.unwrap();
        let ad = session.insert(&new_ad("Sell bike")).await.unwrap();
        session.delete(ad.id).await.unwrap();
        let next = session.insert(&new_ad("Sell bike")).await.unwrap();
        session.commit().await.unwrap();

        assert!(next.id > ad.id);
    }

    #[tokio::test]
    async fn update_keeps_creation_date_and_checks_titles() {
        let store = MemoryStore::new();
        let mut session = store.session().await.unwrap();
        let bike = session.insert(&new_ad("Sell bike")).await.unwrap();
        session.insert(&new_ad("Sell car!")).await.unwrap();

        let mut changed = bike.clone();
        changed.owner = "bob".into();
        changed.creation_date = Utc::now().naive_utc() + chrono::Duration::days(1);
        let stored = session.update(&changed).await.unwrap();
        assert_eq!(stored.owner, "bob");
        assert_eq!(stored.creation_date, bike.creation_date);

        changed.title = "Sell car!".into();
        let err = session.update(&changed).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey));
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let store = MemoryStore::new();
        let mut session = store.session().await.unwrap();

        assert!(matches!(
            session.get_by_id(42).await,
            Err(StoreError::NotFound { id: 42 })
        ));
        assert!(matches!(
            session.delete(42).await,
            Err(StoreError::NotFound { id: 42 })
        ));
    }
}
