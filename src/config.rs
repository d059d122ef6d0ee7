//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::{CacheConfig, EvictionPolicy};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries per cache, 0 = unbounded
    pub max_entries: usize,
    /// Which entry goes when a cache is full
    pub eviction_policy: EvictionPolicy,
    /// TTL in milliseconds for generic entries stored without one
    pub default_ttl_ms: u64,
    /// TTL in milliseconds for generated variants
    pub variant_ttl_ms: u64,
    /// Interval in milliseconds between sweeps, 0 = no sweep task
    pub sweep_interval_ms: u64,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum entries per cache (default: 1000)
    /// - `EVICTION_POLICY` - `lru` or `insertion` (default: lru)
    /// - `DEFAULT_TTL_MS` - Default TTL (default: 300000, five minutes)
    /// - `VARIANT_TTL_MS` - Variant TTL (default: 600000, ten minutes)
    /// - `SWEEP_INTERVAL_MS` - Sweep frequency (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            eviction_policy: env_or("EVICTION_POLICY", defaults.eviction_policy),
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            variant_ttl_ms: env_or("VARIANT_TTL_MS", defaults.variant_ttl_ms),
            sweep_interval_ms: env_or("SWEEP_INTERVAL_MS", defaults.sweep_interval_ms),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Size bound and policy shared by every cache the service builds.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::bounded(self.max_entries, self.eviction_policy)
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    pub fn variant_ttl(&self) -> Duration {
        Duration::from_millis(self.variant_ttl_ms)
    }

    /// None when the sweep task is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_ms > 0).then(|| Duration::from_millis(self.sweep_interval_ms))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            eviction_policy: EvictionPolicy::Lru,
            default_ttl_ms: 300_000,
            variant_ttl_ms: 600_000,
            sweep_interval_ms: 1_000,
            server_port: 3000,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
