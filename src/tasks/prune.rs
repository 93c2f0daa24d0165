//! Cache Prune Task
//!
//! Background task that periodically prunes stale render results.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a background task that periodically prunes stale cache entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between runs, then takes the cache write lock and calls
/// `prune_expired(max_age_ms)`. `get` and `set` never prune on their own;
/// this task is how an operator opts into time-based cleanup.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(RenderCache::new(100, 50 * 1024 * 1024)?));
/// let prune_handle = spawn_prune_task(cache.clone(), 300, 3_600_000);
/// // Later, during shutdown:
/// prune_handle.abort();
/// ```
pub fn spawn_prune_task(
    cache: SharedCache,
    prune_interval_secs: u64,
    max_age_ms: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(prune_interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache prune task: every {}s, max age {}ms",
            prune_interval_secs, max_age_ms
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.prune_expired(max_age_ms)
            };

            if removed > 0 {
                info!("Cache prune: removed {} stale entries", removed);
            } else {
                debug!("Cache prune: no stale entries found");
            }
        }
    })
}
