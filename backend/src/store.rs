use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shared::Counts;
use tracing::debug;

use crate::config::{AppConfig, StoreKind};
use crate::error::{ConfigError, StoreError};
use crate::queries::PgCounterStore;

/// Durable mapping from item id to vote count.
///
/// Implementations must make `increment` a single atomic add so concurrent
/// voters never lose updates, and `initialize` must never reset an existing
/// counter.
#[rocket::async_trait]
pub trait CounterStore: Send + Sync {
    /// Creates the backing table if needed and a zeroed row for every id that
    /// does not have one yet.
    async fn initialize(&self, ids: &[String]) -> Result<(), StoreError>;

    /// Counts for the rows that exist among `ids`. Absent ids are left out.
    async fn fetch_counts(&self, ids: &[String]) -> Result<Counts, StoreError>;

    /// Adds one vote and returns the new count. Fails with
    /// [`StoreError::UnknownItem`] without creating a row when `id` has none.
    async fn increment(&self, id: &str) -> Result<i64, StoreError>;

    fn backend_name(&self) -> &'static str;
}

pub type VoteRows = Mutex<HashMap<String, i64>>;

#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    rows: VoteRows,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: impl IntoIterator<Item = (String, i64)>) -> Self {
        Self {
            rows: Mutex::new(rows.into_iter().collect()),
        }
    }

    pub fn rows(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.rows.lock().map(|rows| rows.clone()).map_err(|_| StoreError::LockFailed)
    }
}

#[rocket::async_trait]
impl CounterStore for MemoryCounterStore {
    async fn initialize(&self, ids: &[String]) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::LockFailed)?;
        for id in ids {
            rows.entry(id.clone()).or_insert(0);
        }
        debug!(rows = rows.len(), "memory vote store seeded");
        Ok(())
    }

    async fn fetch_counts(&self, ids: &[String]) -> Result<Counts, StoreError> {
        let rows = self.rows.lock().map_err(|_| StoreError::LockFailed)?;
        Ok(ids
            .iter()
            .filter_map(|id| rows.get(id).map(|count| (id.clone(), *count)))
            .collect())
    }

    async fn increment(&self, id: &str) -> Result<i64, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| StoreError::LockFailed)?;
        let count = rows
            .get_mut(id)
            .ok_or_else(|| StoreError::UnknownItem(id.to_string()))?;
        *count += 1;
        Ok(*count)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Builds the backend selected by `store`. The Postgres pool connects lazily,
/// so an unreachable database is not a configuration error.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn CounterStore>, ConfigError> {
    match config.store {
        StoreKind::Memory => Ok(Arc::new(MemoryCounterStore::new())),
        StoreKind::Postgres => Ok(Arc::new(PgCounterStore::connect_lazy(config)?)),
    }
}
