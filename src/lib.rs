//! Memory Cache - Namespaced in-process cache
//!
//! Provides bounded key/value stores with TTL expiration, LRU eviction,
//! memory-pressure eviction and background cleanup, grouped into api, user
//! and file namespaces.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheConfig, CacheStatsSnapshot, CacheStore, SizeEstimate};
pub use config::Config;
pub use registry::{CacheRegistry, Namespace, RegistryConfig, RegistryStats};
