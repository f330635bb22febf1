//! Cache Configuration Module
//!
//! Per-instance limits supplied once at construction.

use std::time::Duration;

/// Bytes in one megabyte, as used by the memory ceiling.
pub const BYTES_PER_MB: usize = 1024 * 1024;

// == Cache Config ==
/// Limits for a single cache store. Immutable once the store is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once (always at least 1)
    pub max_size: usize,
    /// TTL applied when `set` is called without one
    pub default_ttl: Duration,
    /// Interval between background sweeps
    pub cleanup_interval: Duration,
    /// Ceiling for the estimated aggregate size of all values
    pub max_memory_bytes: usize,
}

impl CacheConfig {
    // == Constructor ==
    /// Creates a configuration with the memory ceiling given in megabytes.
    ///
    /// A `max_size` of zero is clamped to one so that a freshly inserted
    /// entry can always be stored.
    pub fn new(
        max_size: usize,
        default_ttl: Duration,
        cleanup_interval: Duration,
        max_memory_mb: usize,
    ) -> Self {
        Self {
            max_size: max_size.max(1),
            default_ttl,
            cleanup_interval,
            max_memory_bytes: max_memory_mb.saturating_mul(BYTES_PER_MB),
        }
    }

    /// Overrides the memory ceiling with an exact byte count.
    pub fn with_max_memory_bytes(mut self, bytes: usize) -> Self {
        self.max_memory_bytes = bytes;
        self
    }

    // == Namespace Presets ==
    /// General/API namespace: 1000 entries, 1h TTL, 50 MB.
    pub fn api() -> Self {
        Self::new(
            1000,
            Duration::from_secs(60 * 60),
            Duration::from_secs(5 * 60),
            50,
        )
    }

    /// User-scoped namespace: 500 entries, 30min TTL, 20 MB.
    pub fn user() -> Self {
        Self::new(
            500,
            Duration::from_secs(30 * 60),
            Duration::from_secs(5 * 60),
            20,
        )
    }

    /// File-scoped namespace: 100 entries, 24h TTL, 30 MB.
    pub fn file() -> Self {
        Self::new(
            100,
            Duration::from_secs(24 * 60 * 60),
            Duration::from_secs(60 * 60),
            30,
        )
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::api()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_converts_megabytes() {
        let config = CacheConfig::new(10, Duration::from_secs(1), Duration::from_secs(1), 2);
        assert_eq!(config.max_memory_bytes, 2 * 1024 * 1024);
    }

    #[test]
    fn test_zero_max_size_is_clamped() {
        let config = CacheConfig::new(0, Duration::from_secs(1), Duration::from_secs(1), 1);
        assert_eq!(config.max_size, 1);
    }

    #[test]
    fn test_namespace_presets() {
        let api = CacheConfig::api();
        let user = CacheConfig::user();
        let file = CacheConfig::file();

        assert!(api.max_size > user.max_size);
        assert!(user.max_size > file.max_size);

        assert_eq!(api.default_ttl, Duration::from_secs(3600));
        assert_eq!(user.default_ttl, Duration::from_secs(1800));
        assert_eq!(file.default_ttl, Duration::from_secs(86_400));

        assert_eq!(api.max_memory_bytes, 50 * BYTES_PER_MB);
        assert_eq!(user.max_memory_bytes, 20 * BYTES_PER_MB);
        assert_eq!(file.max_memory_bytes, 30 * BYTES_PER_MB);
    }

    #[test]
    fn test_with_max_memory_bytes() {
        let config = CacheConfig::user().with_max_memory_bytes(512);
        assert_eq!(config.max_memory_bytes, 512);
        assert_eq!(config.max_size, 500);
    }
}
