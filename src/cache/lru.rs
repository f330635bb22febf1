//! LRU Tracker Module
//!
//! Orders keys by a monotonically increasing access tick so the least
//! recently used key can be found in logarithmic time.

use std::collections::BTreeMap;

// == LRU Tracker ==
/// Tracks access order for LRU eviction.
///
/// Every access is assigned a fresh tick from a store-wide counter, so ticks
/// are unique and two keys never tie for "least recently used". The smallest
/// tick is the eviction candidate.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Keys by the tick of their last access
    order: BTreeMap<u64, String>,
    /// Next tick to hand out
    next_tick: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used and returns its new tick.
    ///
    /// `previous` is the tick the key held before, if it was tracked.
    pub fn touch(&mut self, key: &str, previous: Option<u64>) -> u64 {
        if let Some(tick) = previous {
            self.order.remove(&tick);
        }

        let tick = self.next_tick;
        self.next_tick += 1;
        self.order.insert(tick, key.to_string());
        tick
    }

    // == Remove ==
    /// Stops tracking whichever key holds `tick`.
    pub fn remove(&mut self, tick: u64) {
        self.order.remove(&tick);
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Clear ==
    /// Forgets every key. Ticks keep increasing across clears.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
