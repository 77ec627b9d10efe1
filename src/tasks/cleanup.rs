//! TTL Sweep Task
//!
//! Background task that periodically drops expired response cache entries.
//! Expiry is still decided on read with the same predicate, so the sweep only
//! reclaims memory and never changes what a lookup returns.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ResponseCache;

/// Spawns a background task that periodically removes expired responses.
///
/// # Arguments
/// * `cache` - Shared response cache handle
/// * `cleanup_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = ResponseCache::new(300);
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 60);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: ResponseCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting response cache sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.cleanup_expired().await;
            if removed > 0 {
                info!("Cache sweep: removed {} expired responses", removed);
            } else {
                debug!("Cache sweep: no expired responses found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, ManualClock};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_sweep_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new(0));
        let cache = ResponseCache::with_clock(300, clock.clone());
        cache
            .store(CacheKey::from("GET:/nav/data"), Arc::new(json!(1)), 1)
            .await;
        cache
            .store(CacheKey::from("GET:/apa/metadata"), Arc::new(json!(2)), 3600)
            .await;

        let handle = spawn_cleanup_task(cache.clone(), 1);

        clock.advance_secs(2);
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(cache.len().await, 1);
        assert!(cache
            .lookup(&CacheKey::from("GET:/apa/metadata"))
            .await
            .is_some());

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = ResponseCache::new(300);

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
