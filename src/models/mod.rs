//! Request and Response models for the variant cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{GenerateRequest, SetRequest};
pub use responses::{
    CacheStatsView, DeleteResponse, GenerateResponse, GetResponse, HealthResponse, PurgeResponse,
    SetResponse, StatsResponse,
};
