//! Eviction Order Module
//!
//! Tracks which key goes first when the cache hits its size bound.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// == Eviction Policy ==
/// Which key is dropped when a bounded cache is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Least recently used: reads and writes both refresh a key.
    #[default]
    Lru,
    /// Least recently inserted: only writes refresh a key.
    Insertion,
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "insertion" | "fifo" => Ok(Self::Insertion),
            other => Err(format!("unknown eviction policy '{}'", other)),
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lru => f.write_str("lru"),
            Self::Insertion => f.write_str("insertion"),
        }
    }
}

// == Eviction Order ==
/// Keys ordered from most recent (front) to next-to-evict (back).
#[derive(Debug, Default)]
pub struct EvictionOrder {
    policy: EvictionPolicy,
    order: VecDeque<String>,
}

impl EvictionOrder {
    /// Creates an empty order for the given policy.
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            policy,
            order: VecDeque::new(),
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    // == Record Insert ==
    /// Moves `key` to the front. A replaced key counts as a fresh insert.
    pub fn record_insert(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    // == Record Access ==
    /// Refreshes `key` on a read hit; ignored under `Insertion`.
    pub fn record_access(&mut self, key: &str) {
        if self.policy == EvictionPolicy::Lru {
            self.record_insert(key);
        }
    }

    // == Remove ==
    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop Oldest ==
    /// Returns and forgets the next key to evict.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
