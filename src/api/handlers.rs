//! API Handlers
//!
//! HTTP request handlers exposing the cache registry.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, ClearResponse, GetResponse, HealthResponse, KeyResponse, SetRequest,
};
use crate::registry::{CacheRegistry, Namespace, RegistryStats};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The three namespace caches
    pub registry: CacheRegistry<Value>,
}

impl AppState {
    /// Creates a new AppState around an existing registry.
    pub fn new(registry: CacheRegistry<Value>) -> Self {
        Self { registry }
    }

    /// Creates a new AppState from configuration, starting every
    /// namespace's cleanup task.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(CacheRegistry::init(config.registry.clone()))
    }
}

/// Handler for PUT /cache/:namespace/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
    Json(req): Json<SetRequest>,
) -> Result<Json<KeyResponse>> {
    let namespace: Namespace = namespace.parse()?;
    if let Some(error_msg) = validate_key(&key) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state
        .registry
        .namespace(namespace)
        .set(key.clone(), req.value, ttl);
    debug!(%namespace, key = %key, "Stored key");

    Ok(Json(KeyResponse::set(namespace, key)))
}

/// Handler for GET /cache/:namespace/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    let namespace: Namespace = namespace.parse()?;
    let value = state
        .registry
        .namespace(namespace)
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(namespace, key, value)))
}

/// Handler for DELETE /cache/:namespace/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path((namespace, key)): Path<(String, String)>,
) -> Result<Json<KeyResponse>> {
    let namespace: Namespace = namespace.parse()?;
    if !state.registry.namespace(namespace).delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(KeyResponse::deleted(namespace, key)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let cleared = state.registry.stats().total.size;
    state.registry.clear_all();

    Json(ClearResponse::new(cleared))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<RegistryStats> {
    Json(state.registry.stats())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
