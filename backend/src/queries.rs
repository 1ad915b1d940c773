use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use shared::{Counts, VoteRecord};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{ConfigError, StoreError};
use crate::schema::{
    CREATE_VOTES_TABLE, INCREMENT_VOTE, LOCK_SCHEMA, SCHEMA_LOCK_KEY, SEED_VOTES, SELECT_VOTES,
};
use crate::store::CounterStore;

/// [`CounterStore`] over the `votes` table.
#[derive(Debug, Clone)]
pub struct PgCounterStore {
    pool: PgPool,
}

impl PgCounterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn connect_lazy(config: &AppConfig) -> Result<Self, ConfigError> {
        let options = config.pg_connect_options()?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .acquire_timeout(config.connect_timeout())
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[rocket::async_trait]
impl CounterStore for PgCounterStore {
    async fn initialize(&self, ids: &[String]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Concurrent CREATE TABLE IF NOT EXISTS can still collide in pg_type.
        sqlx::query(LOCK_SCHEMA)
            .bind(SCHEMA_LOCK_KEY)
            .execute(&mut *tx)
            .await?;

        sqlx::query(CREATE_VOTES_TABLE).execute(&mut *tx).await?;

        if !ids.is_empty() {
            let seeded = sqlx::query(SEED_VOTES)
                .bind(ids)
                .execute(&mut *tx)
                .await?;
            debug!(new_rows = seeded.rows_affected(), "votes table seeded");
        }

        tx.commit().await?;
        Ok(())
    }

    async fn fetch_counts(&self, ids: &[String]) -> Result<Counts, StoreError> {
        let records = sqlx::query_as::<_, VoteRecord>(SELECT_VOTES)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let count = record.count();
                (record.item_name, count)
            })
            .collect())
    }

    async fn increment(&self, id: &str) -> Result<i64, StoreError> {
        let updated = sqlx::query_scalar::<_, Option<i32>>(INCREMENT_VOTE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match updated {
            Some(count) => Ok(count.map(i64::from).unwrap_or(0)),
            None => Err(StoreError::UnknownItem(id.to_string())),
        }
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
