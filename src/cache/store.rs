//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL
//! expiration and memory-pressure eviction.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{
    CacheConfig, CacheEntry, CacheStats, CacheStatsSnapshot, LruTracker, SizeEstimate,
};

// == Cache Store ==
/// Bounded key/value storage with LRU and memory-pressure eviction.
///
/// The store never fails a caller: absent or expired keys read as `None`,
/// and `set` accepts any value and any TTL.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Limits fixed at construction
    config: CacheConfig,
}

impl<V: SizeEstimate> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store with the given limits.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            config,
        }
    }

    /// Returns the limits this store was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit bumps the entry's access count and recency. Expired entries are
    /// removed and counted as both a miss and a delete.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(Instant::now()),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_miss();
            self.stats.record_deletes(1);
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        let tick = self.lru.touch(key, Some(entry.tick));
        entry.touch(tick);
        self.stats.record_hit();
        Some(entry.value.clone())
    }

    // == Set ==
    /// Stores a value, overwriting any previous entry under the same key.
    ///
    /// Before inserting a new key into a full store the least recently used
    /// entry is evicted. Overwriting a key that is already held never evicts
    /// on count, since the entry total does not grow. If the estimated memory
    /// would then exceed the ceiling (the replaced value's estimate excluded),
    /// the lowest-scoring quarter of the current entries is evicted as well.
    /// The value being inserted is never a candidate.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the configured default if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.config.max_size {
            self.evict_lru();
        }

        let size = value.estimated_size();
        // The replaced value's estimate is released by the insert below
        let replaced = self.entries.get(&key).map_or(0, |entry| entry.size);
        let current = self.memory_usage().saturating_sub(replaced);
        if current.saturating_add(size) > self.config.max_memory_bytes {
            debug!(
                current,
                incoming = size,
                ceiling = self.config.max_memory_bytes,
                "Memory ceiling exceeded, evicting low-frequency entries"
            );
            self.evict_for_memory_pressure();
        }

        let previous_tick = self.entries.get(&key).map(|entry| entry.tick);
        let tick = self.lru.touch(&key, previous_tick);
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        self.entries.insert(key, CacheEntry::new(value, ttl, tick, size));
        self.stats.record_set();
    }

    // == Delete ==
    /// Removes an entry by key. Returns whether anything was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key).is_some();
        if removed {
            self.stats.record_deletes(1);
        }
        removed
    }

    // == Has ==
    /// Checks whether a live entry exists without counting it as an access.
    ///
    /// Expired entries are removed on the way (counted as deletes); hits,
    /// misses and recency are left untouched.
    pub fn has(&mut self, key: &str) -> bool {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_deletes(1);
        }
        !expired
    }

    // == Clear ==
    /// Removes every entry, counting each as a delete.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.lru.clear();
        self.stats.record_deletes(count);
    }

    // == Stats ==
    /// Returns a snapshot of the counters plus current size and memory usage.
    pub fn stats(&self) -> CacheStatsSnapshot {
        self.stats.snapshot(self.entries.len(), self.memory_usage())
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_deletes(expired_keys.len());
        expired_keys.len()
    }

    // == Memory Usage ==
    /// Sum of the size estimates of all held values.
    pub fn memory_usage(&self) -> usize {
        self.entries.values().map(|entry| entry.size).sum()
    }

    // == Length ==
    /// Returns the number of held entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Access metadata for a key, without touching it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Eviction ==
    fn evict_lru(&mut self) {
        if let Some(key) = self.lru.evict_oldest() {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "Evicted least recently used entry");
        }
    }

    /// Removes the quarter of entries (rounded up) with the lowest
    /// access-frequency score. Equal scores evict the less recent entry first.
    fn evict_for_memory_pressure(&mut self) {
        if self.entries.is_empty() {
            return;
        }

        let now = Instant::now();
        let mut ranked: Vec<(f64, u64, &String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.frequency_score(now), entry.tick, key))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let count = ranked.len().div_ceil(4);
        let victims: Vec<String> = ranked
            .into_iter()
            .take(count)
            .map(|(_, _, key)| key.clone())
            .collect();

        for key in &victims {
            self.remove_entry(key);
            self.stats.record_eviction();
        }

        debug!(evicted = victims.len(), "Memory-pressure eviction complete");
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.tick);
        Some(entry)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn config(max_size: usize) -> CacheConfig {
        CacheConfig::new(max_size, Duration::from_secs(300), Duration::from_secs(60), 10)
    }

    fn store(max_size: usize) -> CacheStore<String> {
        CacheStore::new(config(max_size))
    }

    #[test]
    fn test_store_new() {
        let store = store(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.config().max_size, 100);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = store(100);

        store.set("key1", "value1".to_string(), None);

        assert_eq!(store.get("key1"), Some("value1".to_string()));
        assert_eq!(store.len(), 1);

        let stats = store.stats();
        assert_eq!(stats.sets, 1);
        assert_eq!(stats.hits, 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = store(100);

        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_get_updates_access_metadata() {
        let mut store = store(100);
        store.set("key1", "v".to_string(), None);

        store.get("key1");
        store.get("key1");

        let entry = store.entry("key1").unwrap();
        assert_eq!(entry.access_count, 3);
        assert!(entry.last_accessed_at >= entry.created_at);
    }

    #[test]
    fn test_store_delete() {
        let mut store = store(100);

        store.set("key1", "value1".to_string(), None);
        assert!(store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.stats().deletes, 1);
    }

    #[test]
    fn test_store_delete_nonexistent() {
        let mut store = store(100);

        assert!(!store.delete("nonexistent"));
        assert_eq!(store.stats().deletes, 0);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = store(100);

        store.set("key1", "value1".to_string(), None);
        store.get("key1");
        store.set("key1", "value2".to_string(), None);

        assert_eq!(store.entry("key1").unwrap().access_count, 1);
        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().sets, 2);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut store = store(2);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.set("a", "3".to_string(), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);
        assert!(store.has("b"));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = store(100);

        store.set("x", "hello".to_string(), Some(Duration::from_millis(10)));
        assert!(store.get("x").is_some());

        sleep(Duration::from_millis(20));

        let deletes_before = store.stats().deletes;
        assert_eq!(store.get("x"), None);

        let stats = store.stats();
        assert_eq!(stats.deletes, deletes_before + 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 0);
    }

    #[test]
    fn test_zero_ttl_expires_on_next_read() {
        let mut store = store(100);

        store.set("zero", "v".to_string(), Some(Duration::ZERO));

        assert_eq!(store.get("zero"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_default_ttl_applied() {
        let mut store = store(100);
        store.set("key", "v".to_string(), None);
        assert_eq!(store.entry("key").unwrap().ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store(3);

        store.set("key1", "value1".to_string(), None);
        store.set("key2", "value2".to_string(), None);
        store.set("key3", "value3".to_string(), None);

        // Cache is full, adding key4 should evict key1 (oldest)
        store.set("key4", "value4".to_string(), None);

        assert_eq!(store.len(), 3);
        assert_eq!(store.stats().evictions, 1);
        assert_eq!(store.get("key1"), None);
        assert!(store.get("key2").is_some());
        assert!(store.get("key3").is_some());
        assert!(store.get("key4").is_some());
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut store = store(2);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.get("a");
        store.set("c", "3".to_string(), None);

        assert!(store.has("a"));
        assert!(!store.has("b"));
        assert!(store.has("c"));
    }

    #[test]
    fn test_has_does_not_touch_entry() {
        let mut store = store(2);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);

        assert!(store.has("a"));
        assert_eq!(store.entry("a").unwrap().access_count, 1);

        // has() left "a" as the LRU candidate
        store.set("c", "3".to_string(), None);
        assert!(!store.has("a"));

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[test]
    fn test_has_removes_expired() {
        let mut store = store(10);

        store.set("gone", "v".to_string(), Some(Duration::from_millis(5)));
        sleep(Duration::from_millis(15));

        assert!(!store.has("gone"));
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().deletes, 1);
        assert_eq!(store.stats().misses, 0);
    }

    #[test]
    fn test_clear() {
        let mut store = store(10);

        store.set("a", "1".to_string(), None);
        store.set("b", "2".to_string(), None);
        store.clear();

        let stats = store.stats();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.deletes, 2);
        assert_eq!(stats.memory_usage, 0);
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_store_stats() {
        let mut store = store(100);

        store.set("key1", "value1".to_string(), None);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
        assert_eq!(stats.memory_usage, 12);
        assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = store(100);

        store.set("key1", "value1".to_string(), Some(Duration::from_millis(10)));
        store.set("key2", "value2".to_string(), Some(Duration::from_secs(10)));

        sleep(Duration::from_millis(20));

        let removed = store.cleanup_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().deletes, 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_memory_pressure_evicts_low_frequency_entries() {
        let config = config(100).with_max_memory_bytes(1000);
        let mut store: CacheStore<String> = CacheStore::new(config);

        let cold = ["cold1", "cold2"];
        let hot = ["hot1", "hot2", "hot3", "hot4", "hot5", "hot6"];
        for key in cold.iter().chain(hot.iter()) {
            store.set(*key, "v".to_string(), None);
        }

        sleep(Duration::from_millis(5));
        for key in &hot {
            for _ in 0..5 {
                store.get(key);
            }
        }

        // 600 UTF-16 units estimate to 1200 bytes, over the 1000 byte ceiling
        store.set("big", "x".repeat(600), None);

        // ceil(8 / 4) = 2 entries evicted, both cold
        let stats = store.stats();
        assert_eq!(stats.evictions, 2);
        assert_eq!(stats.size, 7);
        for key in &cold {
            assert!(!store.has(key), "{} should have been evicted", key);
        }
        for key in &hot {
            assert!(store.has(key), "{} should have survived", key);
        }
        assert!(store.has("big"));
    }

    #[test]
    fn test_memory_pressure_on_small_store_evicts_at_least_one() {
        let config = config(100).with_max_memory_bytes(15);
        let mut store: CacheStore<String> = CacheStore::new(config);

        store.set("a", "12345".to_string(), None);
        store.set("b", "12345".to_string(), None);

        assert_eq!(store.stats().evictions, 1);
        assert!(!store.has("a"));
        assert!(store.has("b"));
    }

    #[test]
    fn test_overwrite_near_ceiling_does_not_evict() {
        let config = config(100).with_max_memory_bytes(100);
        let mut store: CacheStore<String> = CacheStore::new(config);
        let value = "x".repeat(20);

        store.set("b", value.clone(), None);
        store.set("a", value.clone(), None);
        assert_eq!(store.memory_usage(), 80);

        store.set("a", value, None);

        let stats = store.stats();
        assert_eq!(stats.evictions, 0);
        assert_eq!(stats.size, 2);
        assert_eq!(stats.memory_usage, 80);
        assert!(store.has("b"));
    }

    #[test]
    fn test_oversized_value_is_still_accepted() {
        let config = config(100).with_max_memory_bytes(10);
        let mut store: CacheStore<String> = CacheStore::new(config);

        store.set("huge", "x".repeat(1000), None);

        assert_eq!(store.get("huge").map(|v| v.len()), Some(1000));
        assert_eq!(store.stats().evictions, 0);
        assert_eq!(store.stats().memory_usage, 2000);
    }

    #[test]
    fn test_generic_json_values() {
        let mut store: CacheStore<serde_json::Value> = CacheStore::new(config(10));

        store.set("report", serde_json::json!({ "score": 42, "tags": ["a", "b"] }), None);

        let value = store.get("report").unwrap();
        assert_eq!(value["score"], 42);
        assert!(store.stats().memory_usage > 0);
    }
}
