//! Configuration Module
//!
//! Handles loading server and per-namespace cache configuration from
//! environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheConfig, BYTES_PER_MB};
use crate::registry::RegistryConfig;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Limits for the three cache namespaces
    pub registry: RegistryConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// For each namespace prefix `API_CACHE_`, `USER_CACHE_` and `FILE_CACHE_`:
    /// - `MAX_SIZE` - Maximum entries
    /// - `DEFAULT_TTL_SECS` - Default TTL in seconds
    /// - `CLEANUP_INTERVAL_SECS` - Sweep frequency in seconds
    /// - `MAX_MEMORY_MB` - Memory ceiling in megabytes
    pub fn from_env() -> Self {
        let defaults = RegistryConfig::default();

        Self {
            server_port: env_or("SERVER_PORT", 3000),
            registry: RegistryConfig {
                api: namespace_from_env("API_CACHE_", defaults.api),
                user: namespace_from_env("USER_CACHE_", defaults.user),
                file: namespace_from_env("FILE_CACHE_", defaults.file),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            registry: RegistryConfig::default(),
        }
    }
}

/// Reads one namespace's limits, falling back to `defaults` per variable.
pub fn namespace_from_env(prefix: &str, defaults: CacheConfig) -> CacheConfig {
    let var = |suffix: &str| format!("{}{}", prefix, suffix);

    let max_size = env_or(&var("MAX_SIZE"), defaults.max_size);
    let default_ttl = env_parsed(&var("DEFAULT_TTL_SECS"))
        .map(Duration::from_secs)
        .unwrap_or(defaults.default_ttl);
    let cleanup_interval = env_parsed(&var("CLEANUP_INTERVAL_SECS"))
        .map(Duration::from_secs)
        .unwrap_or(defaults.cleanup_interval);
    let max_memory_bytes = env_parsed::<usize>(&var("MAX_MEMORY_MB"))
        .map(|mb| mb.saturating_mul(BYTES_PER_MB))
        .unwrap_or(defaults.max_memory_bytes);

    CacheConfig::new(max_size, default_ttl, cleanup_interval, 0)
        .with_max_memory_bytes(max_memory_bytes)
}

fn env_parsed<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env_parsed(name).unwrap_or(default)
}
