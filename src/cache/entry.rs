//! Cache Entry Module
//!
//! Defines a single cached value together with its TTL and access metadata.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of insertion or last overwrite
    pub created_at: Instant,
    /// Time-to-live, independent of other entries
    pub ttl: Duration,
    /// Successful reads plus the initial insert
    pub access_count: u64,
    /// Time of the last successful read (or insert)
    pub last_accessed_at: Instant,
    /// Store-wide recency sequence number of the last access
    pub tick: u64,
    /// Estimated size of `value` in bytes
    pub size: usize,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Time-to-live for this entry
    /// * `tick` - Recency tick assigned by the owning store
    /// * `size` - Precomputed size estimate of `value`
    pub fn new(value: V, ttl: Duration, tick: u64, size: usize) -> Self {
        let now = Instant::now();

        Self {
            value,
            created_at: now,
            ttl,
            access_count: 1,
            last_accessed_at: now,
            tick,
            size,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has expired at `now`.
    ///
    /// An entry is live while `now <= created_at + ttl`. A zero TTL is
    /// always expired so that it can never be read back.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.ttl.is_zero() || now.saturating_duration_since(self.created_at) > self.ttl
    }

    /// Checks whether the entry has expired right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, tick: u64) {
        self.access_count += 1;
        self.last_accessed_at = Instant::now();
        self.tick = tick;
    }

    // == Frequency Score ==
    /// Accesses per millisecond of age. Lower scores are evicted first under
    /// memory pressure. Age is clamped to one millisecond.
    pub fn frequency_score(&self, now: Instant) -> f64 {
        let age_ms = now.saturating_duration_since(self.created_at).as_secs_f64() * 1000.0;
        self.access_count as f64 / age_ms.max(1.0)
    }
}
