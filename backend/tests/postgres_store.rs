//! Counter store properties against a live PostgreSQL. Each test skips itself
//! when `DATABASE_URL` is not set. `concurrent_initialize_creates_table_once`
//! drops the `votes` table, so point the suite at a scratch database.

use std::collections::HashMap;
use std::sync::Arc;

use backend::{error::StoreError, BallotBox, CounterStore, Item, PgCounterStore};
use sqlx::postgres::PgPoolOptions;
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// Serialises tests in this file: one of them drops the table.
static SCHEMA: Mutex<()> = Mutex::const_new(());

async fn schema_guard() -> MutexGuard<'static, ()> {
    SCHEMA.lock().await
}

async fn store() -> Option<PgCounterStore> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = PgPoolOptions::new()
        .max_connections(8)
        .connect(&url)
        .await
        .expect("connect to DATABASE_URL");
    Some(PgCounterStore::new(pool))
}

fn unique_ids(n: usize) -> Vec<String> {
    let run = Uuid::new_v4().simple().to_string();
    (0..n).map(|i| format!("t{i}_{run}")).collect()
}

fn items(ids: &[String]) -> Vec<Item> {
    ids.iter().map(|id| Item::new(id.clone(), id.clone(), "")).collect()
}

async fn row_count(store: &PgCounterStore, ids: &[String]) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM votes WHERE item_name = ANY($1)")
        .bind(ids)
        .fetch_one(store.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn initialize_is_idempotent() {
    let _schema = schema_guard().await;
    let Some(store) = store().await else { return };
    let ids = unique_ids(3);

    store.initialize(&ids).await.unwrap();
    store.increment(&ids[0]).await.unwrap();
    store.increment(&ids[0]).await.unwrap();

    for _ in 0..3 {
        store.initialize(&ids).await.unwrap();
    }

    assert_eq!(row_count(&store, &ids).await, 3);
    let counts = store.fetch_counts(&ids).await.unwrap();
    assert_eq!(counts[&ids[0]], 2);
    assert_eq!(counts[&ids[1]], 0);
}

#[tokio::test]
async fn increments_add_up() {
    let _schema = schema_guard().await;
    let Some(store) = store().await else { return };
    let ids = unique_ids(3);
    let ballot_box = BallotBox::new(Arc::new(store), items(&ids));
    ballot_box.initialize().await.unwrap();

    assert!(ballot_box.fetch_all().await.values().all(|count| *count == 0));

    for _ in 0..3 {
        ballot_box.increment(&ids[1]).await.unwrap();
    }
    ballot_box.increment(&ids[0]).await.unwrap();

    let expected: HashMap<String, i64> =
        [(ids[0].clone(), 1), (ids[1].clone(), 3), (ids[2].clone(), 0)].into_iter().collect();
    assert_eq!(ballot_box.fetch_all().await, expected);
}

#[tokio::test]
async fn concurrent_increments_are_not_lost() {
    let _schema = schema_guard().await;
    let Some(store) = store().await else { return };
    let ids = unique_ids(1);
    let ballot_box = Arc::new(BallotBox::new(Arc::new(store), items(&ids)));
    ballot_box.initialize().await.unwrap();

    let voters = 40;
    let handles: Vec<_> = (0..voters)
        .map(|_| {
            let ballot_box = ballot_box.clone();
            let id = ids[0].clone();
            tokio::spawn(async move { ballot_box.increment(&id).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(ballot_box.fetch_all().await[&ids[0]], voters);
}

#[tokio::test]
async fn unknown_item_is_not_created() {
    let _schema = schema_guard().await;
    let Some(store) = store().await else { return };
    let ids = unique_ids(2);
    store.initialize(&ids[..1]).await.unwrap();

    let err = store.increment(&ids[1]).await.unwrap_err();
    assert!(matches!(err, StoreError::UnknownItem(_)));

    assert_eq!(row_count(&store, &ids).await, 1);
    assert_eq!(store.fetch_counts(&ids).await.unwrap().get(&ids[0]), Some(&0));
}

#[tokio::test]
async fn concurrent_initialize_creates_table_once() {
    let _schema = schema_guard().await;
    let Some(store) = store().await else { return };
    let store = Arc::new(store);
    let ids = unique_ids(3);

    for _ in 0..20 {
        sqlx::query("DROP TABLE IF EXISTS votes")
            .execute(store.pool())
            .await
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                let ids = ids.clone();
                tokio::spawn(async move { store.initialize(&ids).await })
            })
            .collect();
        for result in futures::future::join_all(handles).await {
            result.unwrap().unwrap();
        }

        assert_eq!(row_count(&store, &ids).await, ids.len() as i64);
    }
}
