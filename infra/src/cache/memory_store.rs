//! In-memory code store
//!
//! Process-local [`CodeStore`] for development, tests and single-instance
//! deployments. Expiry uses the tokio clock, so paused-time tests can move
//! past a TTL with `tokio::time::advance`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use vm_core::services::verification::CodeStore;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` means the record never expires
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| now < deadline)
    }
}

/// In-memory [`CodeStore`] with per-record TTL
#[derive(Debug, Default)]
pub struct MemoryCodeStore {
    entries: RwLock<HashMap<String, Entry>>,
    simulate_failure: AtomicBool,
}

impl MemoryCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every operation behave like an unreachable backend
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    fn failing(&self) -> bool {
        self.simulate_failure.load(Ordering::SeqCst)
    }

    /// Number of records currently held, expired ones included until purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Remaining lifetime of a live record
    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        let entry = entries.get(key).filter(|entry| entry.is_live(now))?;
        entry.expires_at.map(|deadline| deadline - now)
    }

    /// Drop every expired record, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Spawn a task that purges expired records every `interval`
    ///
    /// The task holds a weak reference and exits once the store is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!(purged, "Purged expired verification codes");
                }
            }
        })
    }
}

#[async_trait]
impl CodeStore for MemoryCodeStore {
    async fn set(&self, key: &str, value: &str, ttl_seconds: i64) -> bool {
        if self.failing() {
            warn!(event = "code_store_write_failed", "Simulated memory store failure");
            return false;
        }

        let expires_at = if ttl_seconds > 0 {
            match Instant::now().checked_add(Duration::from_secs(ttl_seconds as u64)) {
                Some(deadline) => Some(deadline),
                None => {
                    warn!(
                        ttl_seconds,
                        event = "code_store_write_failed",
                        "TTL out of range for the memory store"
                    );
                    return false;
                }
            }
        } else {
            None
        };

        self.entries.write().await.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        true
    }

    async fn get(&self, key: &str) -> Option<String> {
        if self.failing() {
            return None;
        }

        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Expired: purge lazily, unless it was overwritten in between
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
            entries.remove(key);
        }
        None
    }

    async fn exists(&self, key: &str) -> bool {
        if self.failing() {
            return false;
        }

        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.is_live(now))
    }

    async fn delete(&self, key: &str) -> bool {
        if self.failing() {
            return false;
        }

        let now = Instant::now();
        match self.entries.write().await.remove(key) {
            Some(entry) => entry.is_live(now),
            None => false,
        }
    }

    async fn consume(&self, key: &str, expected: &str) -> bool {
        if self.failing() {
            return false;
        }

        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(entry) if entry.is_live(now) && entry.value == expected => {
                entries.remove(key);
                true
            }
            Some(entry) if !entry.is_live(now) => {
                entries.remove(key);
                false
            }
            _ => false,
        }
    }
}
