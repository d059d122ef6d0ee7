//! Sweep Task
//!
//! Background task that periodically purges stale cache entries.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{Clock, SharedCache};

/// Spawns a task that calls `purge_expired` on `cache` every `interval`.
///
/// `name` only labels the log lines. The task runs until aborted through
/// the returned handle. A zero `interval` disables sweeping: the returned
/// task finishes at once.
///
/// # Example
/// ```ignore
/// let cache = ExpiringCache::<String>::new(CacheConfig::unbounded()).into_shared();
/// let handle = spawn_sweep_task("entries", cache.clone(), Duration::from_secs(1));
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_sweep_task<V, C>(
    name: &'static str,
    cache: SharedCache<V, C>,
    interval: Duration,
) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    C: Clock + 'static,
{
    if interval.is_zero() {
        warn!(cache = name, "Sweep interval is zero, not sweeping");
        return tokio::spawn(async {});
    }

    tokio::spawn(async move {
        info!(
            cache = name,
            "Starting sweep task with interval of {} ms",
            interval.as_millis()
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!(cache = name, "Sweep: removed {} stale entries", removed);
            } else {
                debug!(cache = name, "Sweep: no stale entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, ExpiringCache, ManualClock};

    const T0: u64 = 1_700_000_000_000;

    fn shared() -> (SharedCache<String, ManualClock>, ManualClock) {
        let clock = ManualClock::new(T0);
        let cache = ExpiringCache::with_clock(CacheConfig::unbounded(), clock.clone());
        (cache.into_shared(), clock)
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_removes_stale_entries() {
        let (cache, clock) = shared();
        {
            let mut guard = cache.write().await;
            guard
                .set("expire_soon", "value".to_string(), Duration::from_millis(100))
                .unwrap();
            guard
                .set("long_lived", "value".to_string(), Duration::from_secs(3600))
                .unwrap();
        }

        let handle = spawn_sweep_task("test", cache.clone(), Duration::from_secs(1));
        clock.advance(Duration::from_millis(500));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        {
            let guard = cache.read().await;
            assert!(!guard.is_stored("expire_soon"), "Stale entry should be swept");
            assert!(guard.is_stored("long_lived"), "Fresh entry should be kept");
            assert_eq!(guard.stats().swept, 1);
        }

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_waits_for_first_interval() {
        let (cache, clock) = shared();
        cache
            .write()
            .await
            .set("k", "v".to_string(), Duration::from_millis(1))
            .unwrap();
        clock.advance(Duration::from_millis(10));

        let handle = spawn_sweep_task("test", cache.clone(), Duration::from_secs(5));
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(cache.read().await.is_stored("k"));

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_can_be_aborted() {
        let (cache, _) = shared();

        let handle = spawn_sweep_task("test", cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_interval_disables_sweep() {
        let (cache, clock) = shared();
        cache
            .write()
            .await
            .set("k", "v".to_string(), Duration::from_millis(1))
            .unwrap();
        clock.advance(Duration::from_millis(10));

        let handle = spawn_sweep_task("test", cache.clone(), Duration::ZERO);
        handle.await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(cache.read().await.is_stored("k"));
    }
}
