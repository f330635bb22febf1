//! Shared Cache Handle
//!
//! Thread-safe wrapper around a [`CacheStore`] that owns its background
//! cleanup task.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::cache::{CacheConfig, CacheStatsSnapshot, CacheStore, SizeEstimate};
use crate::tasks::{spawn_cleanup_task, CleanupTask};

// == Cache Handle ==
/// Cloneable handle to a single cache store.
///
/// Every operation takes the store-wide lock for its whole read-modify-write
/// sequence, so concurrent callers cannot push the store past `max_size`.
/// Clones share the same store and cleanup task.
pub struct Cache<V> {
    /// Label used in log output
    name: Arc<str>,
    store: Arc<Mutex<CacheStore<V>>>,
    cleanup: Arc<Mutex<Option<CleanupTask>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            store: Arc::clone(&self.store),
            cleanup: Arc::clone(&self.cleanup),
        }
    }
}

impl<V> std::fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("name", &self.name)
            .field("running", &self.is_running())
            .finish()
    }
}

impl<V> Cache<V> {
    /// Whether the background cleanup task is still running.
    pub fn is_running(&self) -> bool {
        self.cleanup
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl<V> Cache<V>
where
    V: SizeEstimate + Send + 'static,
{
    // == Constructor ==
    /// Creates a cache and starts its cleanup task.
    ///
    /// The task needs a tokio runtime. Outside of one (or with a zero
    /// cleanup interval) the cache still works, relying on lazy expiry only.
    pub fn new(name: impl Into<Arc<str>>, config: CacheConfig) -> Self {
        let name = name.into();
        let interval = config.cleanup_interval;
        let store = Arc::new(Mutex::new(CacheStore::new(config)));

        let cleanup = if interval.is_zero() {
            warn!(cache = %name, "Cleanup interval is zero, background sweeps disabled");
            None
        } else if tokio::runtime::Handle::try_current().is_err() {
            warn!(cache = %name, "No tokio runtime, background sweeps disabled");
            None
        } else {
            Some(spawn_cleanup_task(
                Arc::clone(&store),
                interval,
                Arc::clone(&name),
            ))
        };

        info!(cache = %name, "Cache initialized");

        Self {
            name,
            store,
            cleanup: Arc::new(Mutex::new(cleanup)),
        }
    }

    // == Operations ==
    /// Retrieves a live value, recording a hit or a miss.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.store.lock().get(key)
    }

    /// Stores a value with an optional TTL override.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        self.store.lock().set(key, value, ttl);
    }

    /// Removes a key, returning whether it was present.
    pub fn delete(&self, key: &str) -> bool {
        self.store.lock().delete(key)
    }

    /// Checks for a live key without counting an access.
    pub fn has(&self, key: &str) -> bool {
        self.store.lock().has(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.store.lock().clear();
    }

    /// Snapshot of the store's statistics.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.store.lock().stats()
    }

    /// Runs a sweep immediately, returning the number of expired entries
    /// removed.
    pub fn cleanup_expired(&self) -> usize {
        self.store.lock().cleanup_expired()
    }

    // == Lifecycle ==
    /// Stops the cleanup task, waits for it to finish and discards all
    /// entries. A destroyed cache never restarts its task.
    pub async fn destroy(&self) {
        let task = self.cleanup.lock().take();
        if let Some(task) = task {
            task.stop().await;
        }

        self.store.lock().clear();
        info!(cache = %self.name, "Cache destroyed");
    }
}
