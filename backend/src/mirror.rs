use std::collections::HashMap;
use std::sync::Mutex;

use shared::Counts;
use time::{Duration, OffsetDateTime};
use tracing::{debug, error};

const MAX_SESSIONS: usize = 10_000;

struct MirrorEntry {
    counts: Counts,
    stored_at: OffsetDateTime,
}

/// Per-session copy of the counts, so a visitor's page does not re-query
/// the store after each of their own votes. Never authoritative.
pub struct SessionMirror {
    entries: Mutex<HashMap<String, MirrorEntry>>,
    ttl: Duration,
    enabled: bool,
}

impl SessionMirror {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::try_from(ttl).unwrap_or(Duration::HOUR),
            enabled: true,
        }
    }

    pub fn disabled() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::ZERO,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn get(&self, session: &str) -> Option<Counts> {
        if !self.enabled {
            return None;
        }
        let now = OffsetDateTime::now_utc();
        let mut entries = self.entries.lock().ok()?;
        match entries.get(session) {
            Some(entry) if now - entry.stored_at <= self.ttl => Some(entry.counts.clone()),
            Some(_) => {
                entries.remove(session);
                None
            }
            None => None,
        }
    }

    pub fn store(&self, session: &str, counts: Counts) {
        if !self.enabled {
            return;
        }
        let Ok(mut entries) = self.entries.lock() else {
            error!("Failed to acquire session mirror lock");
            return;
        };
        if entries.len() >= MAX_SESSIONS && !entries.contains_key(session) {
            debug!(sessions = entries.len(), "session mirror full, clearing");
            entries.clear();
        }
        entries.insert(session.to_string(), MirrorEntry {
            counts,
            stored_at: OffsetDateTime::now_utc(),
        });
    }

    /// Applies a vote the session just cast. Returns `false` when the session
    /// has no live mirror, in which case the caller should re-read the store.
    pub fn record_vote(&self, session: &str, id: &str, votes: i64) -> bool {
        if !self.enabled {
            return false;
        }
        let now = OffsetDateTime::now_utc();
        let Ok(mut entries) = self.entries.lock() else {
            return false;
        };
        match entries.get_mut(session) {
            Some(entry) if now - entry.stored_at <= self.ttl => {
                let count = entry.counts.entry(id.to_string()).or_insert(0);
                *count = (*count + 1).max(votes);
                true
            }
            _ => false,
        }
    }

    pub fn invalidate_all(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            if !entries.is_empty() {
                debug!(sessions = entries.len(), "session mirror discarded");
            }
            entries.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
