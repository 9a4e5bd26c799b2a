//! Store error kinds

/// Failure of a record store operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate key: title already exists")]
    DuplicateKey,

    #[error("not found: advertisement '{id}'")]
    NotFound { id: i64 },

    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return Self::DuplicateKey;
            }
        }

        match e {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::WorkerCrashed => Self::Unavailable(e),
            other => Self::Database(other),
        }
    }
}
