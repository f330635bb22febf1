//! Cache Statistics Module
//!
//! Tracks hits, misses, sets, deletes and evictions for one cache store.

use serde::{Deserialize, Serialize};

/// Hit rate for the given counters, 0.0 when nothing has been read yet.
pub fn hit_rate(hits: u64, misses: u64) -> f64 {
    let total = hits + misses;
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}

// == Cache Stats ==
/// Running counters owned by a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Successful reads
    pub hits: u64,
    /// Reads of absent or expired keys
    pub misses: u64,
    /// Calls to `set`
    pub sets: u64,
    /// Removals by delete, expiry, sweep or clear
    pub deletes: u64,
    /// Removals by the LRU or memory-pressure policies
    pub evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        hit_rate(self.hits, self.misses)
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_set(&mut self) {
        self.sets += 1;
    }

    /// Adds `count` removals to the delete counter.
    pub fn record_deletes(&mut self, count: usize) {
        self.deletes += count as u64;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Combines the counters with the store's current size and memory usage.
    pub fn snapshot(&self, size: usize, memory_usage: usize) -> CacheStatsSnapshot {
        CacheStatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            deletes: self.deletes,
            evictions: self.evictions,
            size,
            memory_usage,
            hit_rate: self.hit_rate(),
        }
    }
}

// == Stats Snapshot ==
/// Point-in-time statistics returned to callers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    /// Explicit deletes, clears, and expired entries removed by `get`, `has`
    /// or the cleanup sweep
    pub deletes: u64,
    /// Removals by LRU or memory-pressure eviction
    pub evictions: u64,
    /// Entries currently held, including expired ones not yet swept
    pub size: usize,
    /// Sum of the size estimates of all held values, in bytes
    pub memory_usage: usize,
    pub hit_rate: f64,
}
