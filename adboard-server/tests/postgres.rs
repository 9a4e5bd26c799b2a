//! PostgreSQL store tests
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p adboard-server -- --ignored
//!
//! Each test uses its own title prefix so they can share one database.

use adboard_server::config::connect_options_from_url;
use adboard_server::db::{create_pool, migrations};
use adboard_server::models::{AdTitle, CreateAdvertisement};
use adboard_server::{AdvertisementStore, PgStore, StoreError};

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let options = connect_options_from_url(&url).expect("bad DATABASE_URL");
    let pool = create_pool(options).await.expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    PgStore::new(pool)
}

fn unique_title(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}")
}

fn new_ad(title: &str) -> CreateAdvertisement {
    CreateAdvertisement {
        title: AdTitle::new(title).unwrap(),
        description: "Good condition".into(),
        owner: "alice".into(),
    }
}

#[tokio::test]
#[ignore = "requires database"]
async fn migrations_are_idempotent() {
    let store = store().await;
    migrations::run(store.pool()).await.unwrap();
}

#[tokio::test]
#[ignore = "requires database"]
async fn insert_commit_and_fetch() {
    let store = store().await;
    let title = unique_title("insert");

    let mut session = store.session().await.unwrap();
    let created = session.insert(&new_ad(&title)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.session().await.unwrap();
    let fetched = session.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
#[ignore = "requires database"]
async fn unique_violation_is_duplicate_key() {
    let store = store().await;
    let title = unique_title("dup");

    let mut session = store.session().await.unwrap();
    session.insert(&new_ad(&title)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.session().await.unwrap();
    let err = session.insert(&new_ad(&title)).await.unwrap_err();
    assert!(matches!(err, StoreError::DuplicateKey));
}

#[tokio::test]
#[ignore = "requires database"]
async fn uncommitted_session_rolls_back() {
    let store = store().await;
    let title = unique_title("rollback");

    let id = {
        let mut session = store.session().await.unwrap();
        session.insert(&new_ad(&title)).await.unwrap().id
    };

    let mut session = store.session().await.unwrap();
    assert!(matches!(
        session.get_by_id(id).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires database"]
async fn update_preserves_creation_date() {
    let store = store().await;
    let title = unique_title("update");

    let mut session = store.session().await.unwrap();
    let created = session.insert(&new_ad(&title)).await.unwrap();
    session.commit().await.unwrap();

    let mut session = store.session().await.unwrap();
    let mut changed = created.clone();
    changed.owner = "bob".into();
    let updated = session.update(&changed).await.unwrap();
    session.commit().await.unwrap();

    assert_eq!(updated.owner, "bob");
    assert_eq!(updated.creation_date, created.creation_date);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_twice_is_not_found() {
    let store = store().await;
    let title = unique_title("delete");

    let mut session = store.session().await.unwrap();
    let created = session.insert(&new_ad(&title)).await.unwrap();
    session.delete(created.id).await.unwrap();
    let err = session.delete(created.id).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires database"]
async fn concurrent_sessions_admit_one_title() {
    const WRITERS: usize = 8;
    let store = store().await;
    let title = unique_title("race");

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let store = store.clone();
            let title = title.clone();
            tokio::spawn(async move {
                let mut session = store.session().await?;
                session.insert(&new_ad(&title)).await?;
                session.commit().await
            })
        })
        .collect();

    let mut created = 0;
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(()) => created += 1,
            Err(StoreError::DuplicateKey) => duplicates += 1,
            Err(e) => panic!("unexpected store error: {e}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(duplicates, WRITERS - 1);
}
