//! Cache Module
//!
//! Provides in-memory caching with per-entry TTL, lazy eviction on read,
//! an optional size bound and single-flight coalescing of misses.

mod clock;
mod entry;
mod order;
mod single_flight;
mod stats;
mod store;


// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use order::{EvictionOrder, EvictionPolicy};
pub use single_flight::SingleFlight;
pub use stats::CacheStats;
pub use store::{CacheConfig, ExpiringCache, SharedCache};
