//! Cache Entry Module
//!
//! Defines a single cached value together with its creation time and TTL.

use std::time::Duration;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time-to-live in milliseconds, counted from `created_at`
    pub ttl_ms: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped at `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - How long the entry stays fresh
    /// * `now` - Current time in Unix milliseconds
    pub fn new(value: V, ttl: Duration, now: u64) -> Self {
        Self {
            value,
            created_at: now,
            ttl_ms: ttl.as_millis().min(u64::MAX as u128) as u64,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served at `now`.
    ///
    /// Boundary condition: an entry read at exactly `created_at + ttl_ms` is
    /// still fresh. A zero TTL is never fresh. If the clock reads earlier
    /// than `created_at`, the entry's age is taken as zero.
    pub fn is_fresh(&self, now: u64) -> bool {
        self.ttl_ms > 0 && self.age_ms(now) <= self.ttl_ms
    }

    // == Is Expired ==
    /// Inverse of [`CacheEntry::is_fresh`].
    pub fn is_expired(&self, now: u64) -> bool {
        !self.is_fresh(now)
    }

    /// Milliseconds since the entry was stamped.
    pub fn age_ms(&self, now: u64) -> u64 {
        now.saturating_sub(self.created_at)
    }

    /// Last instant (inclusive) at which the entry is fresh.
    pub fn expires_at(&self) -> u64 {
        self.created_at.saturating_add(self.ttl_ms)
    }

    // == Time To Live ==
    /// Returns remaining freshness in milliseconds, 0 once stale.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        if self.is_fresh(now) {
            self.ttl_ms - self.age_ms(now)
        } else {
            0
        }
    }
}
