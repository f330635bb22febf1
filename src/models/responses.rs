//! Response DTOs for the cache HTTP API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::registry::Namespace;

/// Response body for `GET /cache/:namespace/:key`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub namespace: Namespace,
    pub key: String,
    pub value: serde_json::Value,
}

impl GetResponse {
    pub fn new(namespace: Namespace, key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            namespace,
            key: key.into(),
            value,
        }
    }
}

/// Response body for `PUT` and `DELETE` on `/cache/:namespace/:key`
#[derive(Debug, Clone, Serialize)]
pub struct KeyResponse {
    /// Success message
    pub message: String,
    pub namespace: Namespace,
    pub key: String,
}

impl KeyResponse {
    /// Response for a stored key
    pub fn set(namespace: Namespace, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully in '{}'", key, namespace),
            namespace,
            key,
        }
    }

    /// Response for a deleted key
    pub fn deleted(namespace: Namespace, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully from '{}'", key, namespace),
            namespace,
            key,
        }
    }
}

/// Response body for `DELETE /cache`
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries removed across all namespaces
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} entries", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
