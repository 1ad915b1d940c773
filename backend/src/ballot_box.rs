use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use shared::tally::{fill_missing, zero_counts};
use shared::{validate_item_id, CountSource, Counts, Item, Tally};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::store::CounterStore;

/// The vote counter as seen by the HTTP layer: an injected [`CounterStore`]
/// bound to the configured items.
pub struct BallotBox {
    store: Arc<dyn CounterStore>,
    items: Vec<Item>,
    ids: Vec<String>,
    initialized: AtomicBool,
    /// Held for the whole of an initialize call; remembers when the store
    /// was last found unreachable.
    init_lock: Mutex<Option<Instant>>,
    retry_cooldown: Duration,
}

impl BallotBox {
    pub fn new(store: Arc<dyn CounterStore>, items: Vec<Item>) -> Self {
        let ids = items.iter().map(|item| item.id.clone()).collect();
        Self {
            store,
            items,
            ids,
            initialized: AtomicBool::new(false),
            init_lock: Mutex::new(None),
            retry_cooldown: Duration::ZERO,
        }
    }

    /// After an unreachable-store failure, [`Self::ensure_initialized`] does
    /// not try again until `cooldown` has passed.
    pub fn with_retry_cooldown(mut self, cooldown: Duration) -> Self {
        self.retry_cooldown = cooldown;
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Seeds the store even if an earlier call succeeded. Once set, the
    /// initialized flag is never cleared by a later failure.
    #[instrument(skip(self), fields(backend = self.backend_name()))]
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let mut last_unavailable = self.init_lock.lock().await;
        self.run_initialize(&mut last_unavailable).await
    }

    /// Runs [`Self::initialize`] unless an earlier call already succeeded.
    /// Concurrent callers wait for a single attempt.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        if self.is_initialized() {
            return Ok(());
        }

        let mut last_unavailable = self.init_lock.lock().await;
        if self.is_initialized() {
            return Ok(());
        }
        if let Some(at) = *last_unavailable {
            if at.elapsed() < self.retry_cooldown {
                return Err(StoreError::Unavailable(
                    "vote store was unreachable moments ago".into(),
                ));
            }
        }
        self.run_initialize(&mut last_unavailable).await
    }

    async fn run_initialize(&self, last_unavailable: &mut Option<Instant>) -> Result<(), StoreError> {
        match self.store.initialize(&self.ids).await {
            Ok(()) => {
                self.initialized.store(true, Ordering::Release);
                *last_unavailable = None;
                info!(items = self.ids.len(), backend = self.backend_name(), "vote store initialized");
                Ok(())
            }
            Err(e) => {
                if e.is_unavailable() {
                    *last_unavailable = Some(Instant::now());
                }
                warn!(error = %e, "vote store initialization failed");
                Err(e)
            }
        }
    }

    async fn try_fetch(&self) -> Result<Counts, StoreError> {
        let counts = self.store.fetch_counts(&self.ids).await?;
        Ok(fill_missing(&self.items, &counts))
    }

    /// Current count of every configured item. Never fails: when the store
    /// cannot be read every item reads as zero.
    pub async fn fetch_all(&self) -> Counts {
        match self.try_fetch().await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(error = %e, "falling back to zero counts");
                zero_counts(&self.items)
            }
        }
    }

    /// Like [`Self::fetch_all`], but marks fallback results and carries a
    /// notice for the page.
    pub async fn tally(&self) -> Tally {
        match self.try_fetch().await {
            Ok(counts) => Tally::from_counts(&self.items, &counts, CountSource::Store),
            Err(e) => {
                warn!(error = %e, "falling back to zero counts");
                Tally::from_counts(&self.items, &zero_counts(&self.items), CountSource::Fallback)
                    .with_notice(format!("Vote counts are unavailable right now: {e}"))
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn increment(&self, id: &str) -> Result<i64, StoreError> {
        validate_item_id(id)?;
        let votes = self.store.increment(id).await?;
        debug!(votes, "vote recorded");
        Ok(votes)
    }
}
