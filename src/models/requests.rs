//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;

/// Maximum accepted key length in bytes.
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for `PUT /cache/:namespace/:key`
///
/// # Fields
/// - `value`: Any JSON value to store
/// - `ttl_ms`: Optional TTL in milliseconds (namespace default if omitted).
///   Zero or negative values store an entry that is already expired.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: serde_json::Value,
    /// Optional TTL in milliseconds
    #[serde(default)]
    pub ttl_ms: Option<i64>,
}

impl SetRequest {
    /// TTL override for the cache, clamping negative values to zero.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_ms
            .map(|ms| Duration::from_millis(u64::try_from(ms).unwrap_or(0)))
    }
}

/// Validates a key taken from the request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
