//! TTL Cleanup Task
//!
//! Background task that periodically sweeps expired entries from a store.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, SizeEstimate};

// == Cleanup Task ==
/// Handle to a running sweep task.
///
/// The task moves from running to stopped exactly once. [`CleanupTask::stop`]
/// waits for it to exit, so no sweep is in flight afterwards. Dropping the
/// handle without stopping aborts the task.
#[derive(Debug)]
pub struct CleanupTask {
    handle: Option<JoinHandle<()>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl CleanupTask {
    /// Signals the task and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if !err.is_cancelled() {
                    warn!("TTL cleanup task ended abnormally: {}", err);
                }
            }
        }
    }

    /// Whether the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

/// Spawns a background task that sweeps `store` every `period`.
///
/// The first sweep happens one full period after the call. A sweep holds
/// the store lock for its whole scan and never yields halfway, so it cannot
/// interleave with a caller's `get` or `set`.
///
/// # Panics
/// Must be called from within a tokio runtime, with a non-zero `period`.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new(CacheConfig::api())));
/// let task = spawn_cleanup_task(store.clone(), Duration::from_secs(300), "api".into());
/// // Later, during shutdown:
/// task.stop().await;
/// ```
pub fn spawn_cleanup_task<V>(
    store: Arc<Mutex<CacheStore<V>>>,
    period: Duration,
    name: Arc<str>,
) -> CleanupTask
where
    V: SizeEstimate + Send + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        info!(
            cache = %name,
            "Starting TTL cleanup task with interval of {}ms",
            period.as_millis()
        );

        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    info!(cache = %name, "TTL cleanup task stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = store.lock().cleanup_expired();

                    if removed > 0 {
                        info!(cache = %name, "TTL cleanup: removed {} expired entries", removed);
                    } else {
                        debug!(cache = %name, "TTL cleanup: no expired entries found");
                    }
                }
            }
        }
    });

    CleanupTask {
        handle: Some(handle),
        shutdown: Some(shutdown_tx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheConfig;

    fn shared_store() -> Arc<Mutex<CacheStore<String>>> {
        let config = CacheConfig::new(100, Duration::from_secs(300), Duration::from_millis(20), 1);
        Arc::new(Mutex::new(CacheStore::new(config)))
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let store = shared_store();

        store
            .lock()
            .set("expire_soon", "value".to_string(), Some(Duration::from_millis(10)));

        let task = spawn_cleanup_task(store.clone(), Duration::from_millis(20), "test".into());

        tokio::time::sleep(Duration::from_millis(100)).await;

        {
            let guard = store.lock();
            assert_eq!(guard.len(), 0, "Expired entry should have been swept");
            assert_eq!(guard.stats().deletes, 1);
        }

        task.stop().await;
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let store = shared_store();

        store
            .lock()
            .set("long_lived", "value".to_string(), Some(Duration::from_secs(3600)));

        let task = spawn_cleanup_task(store.clone(), Duration::from_millis(20), "test".into());

        tokio::time::sleep(Duration::from_millis(80)).await;

        assert_eq!(store.lock().get("long_lived"), Some("value".to_string()));

        task.stop().await;
    }

    #[tokio::test]
    async fn test_no_sweep_before_first_period() {
        let store = shared_store();

        store
            .lock()
            .set("expired", "value".to_string(), Some(Duration::ZERO));

        let task = spawn_cleanup_task(store.clone(), Duration::from_secs(60), "test".into());
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Still physically present, but never readable
        assert_eq!(store.lock().len(), 1);
        assert_eq!(store.lock().get("expired"), None);

        task.stop().await;
    }

    #[tokio::test]
    async fn test_stop_waits_for_exit() {
        let store = shared_store();
        let task = spawn_cleanup_task(store.clone(), Duration::from_millis(10), "test".into());

        assert!(!task.is_finished());
        task.stop().await;

        // Only the caller's reference remains once the task has exited
        assert_eq!(Arc::strong_count(&store), 1);
    }

    #[tokio::test]
    async fn test_drop_aborts_task() {
        let store = shared_store();
        let task = spawn_cleanup_task(store.clone(), Duration::from_millis(10), "test".into());

        drop(task);
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(Arc::strong_count(&store), 1);
    }
}
