//! Expiry Sweep Task
//!
//! Background task that periodically removes expired cache entries, for
//! callers that need memory released even for keys nobody reads again.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{saturating_millis, Clock, SharedCache};

/// Spawns a background task that purges expired entries every `interval`.
///
/// The task holds the write lock only for the duration of one purge. Abort
/// it through the returned handle during shutdown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(BoundedTtlCache::new(50)?));
/// let sweep_handle = spawn_sweep_task(cache.clone(), Duration::from_secs(30));
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V, C>(cache: SharedCache<V, C>, interval: Duration) -> JoinHandle<()>
where
    V: Send + Sync + 'static,
    C: Clock + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = saturating_millis(interval), "Starting expiry sweep task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.purge_expired();

            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}
