//! API Module
//!
//! HTTP handlers and routing for the variant cache service.
//!
//! # Endpoints
//! - `PUT /cache` - Store a JSON value with a TTL
//! - `GET /cache/:key` - Retrieve a fresh value by key
//! - `DELETE /cache/:key` - Delete a key
//! - `DELETE /cache` - Clear all generic entries
//! - `POST /cache/sweep` - Purge stale entries now
//! - `POST /variants` - Generate (or reuse) variants for a product
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
