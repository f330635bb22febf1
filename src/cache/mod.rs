//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction and
//! memory-pressure eviction.

mod config;
mod entry;
mod lru;
mod shared;
mod size;
mod stats;
mod store;


// Re-export public types
pub use config::{CacheConfig, BYTES_PER_MB};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use shared::Cache;
pub use size::{estimate_serialized, estimate_str, SizeEstimate, FALLBACK_ESTIMATE};
pub use stats::{hit_rate, CacheStats, CacheStatsSnapshot};
pub use store::CacheStore;
