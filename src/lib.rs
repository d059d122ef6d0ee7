//! Variant Cache - memoization for generated onepager variants
//!
//! An expiring in-memory key-value cache with per-entry TTL, lazy eviction
//! on read, an optional size bound and single-flight coalescing of misses,
//! plus the variant-generation service and HTTP API built on it.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod variants;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
