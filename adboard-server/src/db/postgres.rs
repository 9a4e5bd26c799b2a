//! PostgreSQL record store
//!
//! A session is one transaction taken from the pool, begun lazily on the
//! first query. Opening a session never touches the database, so requests
//! that fail validation cost no connection. sqlx rolls the transaction back
//! and returns the connection when it is dropped uncommitted.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use super::store::{AdvertisementStore, StoreSession};
use super::StoreError;
use crate::models::{Advertisement, CreateAdvertisement};

/// Store backed by a connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl AdvertisementStore for PgStore {
    async fn session(&self) -> Result<Box<dyn StoreSession>, StoreError> {
        Ok(Box::new(PgSession {
            pool: self.pool.clone(),
            tx: None,
        }))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// One request's transaction, started on first use
pub struct PgSession {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSession {
    /// Connection of the open transaction, beginning one if needed.
    async fn conn(&mut self) -> Result<&mut PgConnection, StoreError> {
        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => self.pool.begin().await?,
        };
        Ok(&mut **self.tx.insert(tx))
    }
}

#[async_trait]
impl StoreSession for PgSession {
    async fn insert(&mut self, new: &CreateAdvertisement) -> Result<Advertisement, StoreError> {
        let ad = sqlx::query_as::<_, Advertisement>(
            r#"
            INSERT INTO advertisement (title, description, owner)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, owner, creation_date
            "#,
        )
        .bind(new.title.as_str())
        .bind(&new.description)
        .bind(&new.owner)
        .fetch_one(self.conn().await?)
        .await?;

        tracing::debug!(id = ad.id, "inserted advertisement");
        Ok(ad)
    }

    async fn get_by_id(&mut self, id: i64) -> Result<Advertisement, StoreError> {
        sqlx::query_as::<_, Advertisement>(
            r#"
            SELECT id, title, description, owner, creation_date
            FROM advertisement
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.conn().await?)
        .await?
        .ok_or(StoreError::NotFound { id })
    }

    async fn update(&mut self, ad: &Advertisement) -> Result<Advertisement, StoreError> {
        // creation_date is deliberately absent from the SET list
        let updated = sqlx::query_as::<_, Advertisement>(
            r#"
            UPDATE advertisement
            SET title = $2, description = $3, owner = $4
            WHERE id = $1
            RETURNING id, title, description, owner, creation_date
            "#,
        )
        .bind(ad.id)
        .bind(&ad.title)
        .bind(&ad.description)
        .bind(&ad.owner)
        .fetch_optional(self.conn().await?)
        .await?
        .ok_or(StoreError::NotFound { id: ad.id })?;

        tracing::debug!(id = ad.id, "updated advertisement");
        Ok(updated)
    }

    async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM advertisement WHERE id = $1")
            .bind(id)
            .execute(self.conn().await?)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }

        tracing::debug!(id, "deleted advertisement");
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        // Nothing was queried, so there is nothing to commit
        if let Some(tx) = self.tx {
            tx.commit().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sqlx::postgres::PgPoolOptions;

    use super::*;
    use crate::config::DatabaseConfig;

    /// Store pointing at a port nothing listens on
    fn unreachable_store() -> PgStore {
        let options = DatabaseConfig {
            port: 1,
            ..DatabaseConfig::default()
        }
        .connect_options();

        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy_with(options);
        PgStore::new(pool)
    }

    #[tokio::test]
    async fn session_opens_without_a_connection() {
        let store = unreachable_store();

        let session = store.session().await.expect("session must not connect");
        // untouched session has nothing to commit
        session.commit().await.unwrap();
    }

    #[tokio::test]
    async fn first_query_reports_unavailable() {
        let store = unreachable_store();
        let mut session = store.session().await.unwrap();

        let err = session.get_by_id(1).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)), "got {err:?}");

        assert!(matches!(store.ping().await, Err(StoreError::Unavailable(_))));
    }
}
