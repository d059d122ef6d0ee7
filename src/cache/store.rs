//! Cache Store Module
//!
//! Main cache engine: HashMap storage, per-entry TTL with lazy eviction on
//! read, an optional size bound and an explicit sweep.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{
    CacheEntry, CacheStats, Clock, EvictionOrder, EvictionPolicy, SystemClock,
};
use crate::error::{CacheError, Result};

/// A cache shared between handlers, services and the sweep task.
pub type SharedCache<V, C = SystemClock> = Arc<RwLock<ExpiringCache<V, C>>>;

// == Cache Config ==
/// Size bound and eviction policy for an [`ExpiringCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheConfig {
    /// Maximum number of stored entries, None = unbounded
    pub max_entries: Option<usize>,
    /// Which entry goes when the bound is hit
    pub policy: EvictionPolicy,
}

impl CacheConfig {
    /// No size bound; entries leave only by expiry, delete or clear.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Bounded cache. A bound of 0 means unbounded.
    pub fn bounded(max_entries: usize, policy: EvictionPolicy) -> Self {
        Self {
            max_entries: (max_entries > 0).then_some(max_entries),
            policy,
        }
    }
}

// == Expiring Cache ==
/// Key-value cache where every entry carries its own TTL.
///
/// Stale entries are removed by the read that discovers them, by
/// [`ExpiringCache::purge_expired`], or to make room under the size bound.
#[derive(Debug)]
pub struct ExpiringCache<V, C: Clock = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction candidates, next-to-go at the back
    order: EvictionOrder,
    /// Performance statistics
    stats: CacheStats,
    config: CacheConfig,
    clock: C,
}

impl<V> ExpiringCache<V, SystemClock> {
    /// Creates an empty cache on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C: Clock> ExpiringCache<V, C> {
    // == Constructor ==
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        let config = CacheConfig::bounded(config.max_entries.unwrap_or(0), config.policy);
        Self {
            entries: HashMap::new(),
            order: EvictionOrder::new(config.policy),
            stats: CacheStats::new(),
            config,
            clock,
        }
    }

    /// Wraps the cache for sharing across tasks.
    pub fn into_shared(self) -> SharedCache<V, C> {
        Arc::new(RwLock::new(self))
    }

    // == Set ==
    /// Stores `value` under `key`, fresh for `ttl` from now.
    ///
    /// An existing entry for `key` is replaced outright, creation time and
    /// TTL included. A zero `ttl` stores an entry that no read will return.
    ///
    /// # Errors
    /// `InvalidArgument` if the key is empty.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) -> Result<()> {
        let key = key.into();
        validate_key(&key)?;

        let now = self.clock.now_ms();
        if !self.entries.contains_key(&key) {
            self.make_room(now);
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl, now));
        self.order.record_insert(&key);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns a clone of the fresh value for `key`.
    ///
    /// A stale entry is removed before `None` is returned, so it stops
    /// occupying memory even if the key is never written again.
    pub fn get(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();

        let fresh = match self.entries.get(key) {
            Some(entry) => entry.is_fresh(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if !fresh {
            self.remove_entry(key);
            self.stats.record_expiration();
            return None;
        }

        self.stats.record_hit();
        self.order.record_access(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Like [`ExpiringCache::get`], but records no hit or miss and leaves the
    /// eviction order alone. A stale entry is still removed.
    pub fn peek(&mut self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        let now = self.clock.now_ms();
        let fresh = self.entries.get(key)?.is_fresh(now);
        if !fresh {
            self.remove_entry(key);
            return None;
        }
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes the entry for `key`. Returns whether one was stored.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Counters other than `total_entries` are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge Expired ==
    /// Removes all stale entries. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let removed = self.remove_stale(now);
        self.stats.record_swept(removed);
        removed
    }

    // == Inspection ==
    /// Whether `key` occupies storage, fresh or not. Never evicts.
    pub fn is_stored(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remaining freshness of `key`, None if absent or stale. Never evicts.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| Duration::from_millis(entry.ttl_remaining_ms(now)))
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Number of stored entries, stale ones not yet evicted included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    fn remove_stale(&mut self, now: u64) -> usize {
        let stale: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &stale {
            self.remove_entry(key);
        }
        stale.len()
    }

    /// Frees one slot when the bound is reached: stale entries first, then
    /// the oldest live entry under the configured policy.
    fn make_room(&mut self, now: u64) {
        let Some(max_entries) = self.config.max_entries else {
            return;
        };
        if self.entries.len() < max_entries {
            return;
        }

        let swept = self.remove_stale(now);
        self.stats.record_swept(swept);

        while self.entries.len() >= max_entries {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                self.stats.record_eviction();
            }
        }
        self.stats.set_total_entries(self.entries.len());
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidArgument("Key cannot be empty".to_string()));
    }
    Ok(())
}
