//! Single-Flight Module
//!
//! Coalesces concurrent computations of the same key so that callers who
//! miss the cache together wait on one piece of work instead of each
//! repeating it.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::OnceCell;

type Flights<V> = HashMap<String, Arc<OnceCell<V>>>;

// == Single Flight ==
/// Map of key to the computation currently running for it.
///
/// The key is released as soon as its computation completes or its caller
/// goes away; results are not remembered here. Pair it with an
/// [`ExpiringCache`] for that.
///
/// [`ExpiringCache`]: crate::cache::ExpiringCache
#[derive(Debug)]
pub struct SingleFlight<V> {
    in_flight: Mutex<Flights<V>>,
}

impl<V> Default for SingleFlight<V> {
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> SingleFlight<V> {
    // Every critical section is one map operation; poisoning is ignored.
    fn flights(&self) -> MutexGuard<'_, Flights<V>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of keys with a computation currently running.
    pub fn in_flight(&self) -> usize {
        self.flights().len()
    }
}

impl<V: Clone> SingleFlight<V> {
    pub fn new() -> Self {
        Self::default()
    }

    // == Run ==
    /// Runs `compute` for `key` unless a computation for `key` is already
    /// in flight, in which case its result is shared.
    ///
    /// Errors are not shared: if the running computation fails or is
    /// dropped, each waiting caller falls back to its own `compute`.
    pub async fn run<F, Fut, E>(&self, key: &str, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self
            .flights()
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        let release = Release {
            flight: self,
            key,
            cell,
        };

        let result = release.cell.get_or_try_init(compute).await.cloned();
        result
    }
}

// == Release Guard ==
/// Drops the map entry of one `run` call on every exit path, cancellation
/// included. A newer flight for the same key is left alone.
struct Release<'a, V> {
    flight: &'a SingleFlight<V>,
    key: &'a str,
    cell: Arc<OnceCell<V>>,
}

impl<V> Drop for Release<'_, V> {
    fn drop(&mut self) {
        let mut flights = self.flight.flights();
        if flights
            .get(self.key)
            .is_some_and(|current| Arc::ptr_eq(current, &self.cell))
        {
            flights.remove(self.key);
        }
    }
}
