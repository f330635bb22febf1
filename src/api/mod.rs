//! API Module
//!
//! HTTP handlers and routing exposing the cache registry.
//!
//! # Endpoints
//! - `PUT /cache/:namespace/:key` - Store a value
//! - `GET /cache/:namespace/:key` - Retrieve a value
//! - `DELETE /cache/:namespace/:key` - Delete a key
//! - `DELETE /cache` - Clear all namespaces
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
