//! Cache Reaper Task
//!
//! Background task that periodically removes cache entries older than the
//! cache interval.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, trace};

use crate::cache::CacheStore;

// == Reaper ==
/// Handle to a running reaper task.
///
/// The task stops when [`Reaper::shutdown`] is called or when the handle is
/// dropped, since either closes the stop channel.
#[derive(Debug)]
pub struct Reaper {
    handle: JoinHandle<()>,
    stop: Option<oneshot::Sender<()>>,
}

impl Reaper {
    /// Signals the task to stop and waits for it to finish.
    pub async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            // The task may already be gone; nothing to signal then.
            let _ = stop.send(());
        }
        if let Err(err) = (&mut self.handle).await {
            debug!("Cache reaper ended abnormally: {}", err);
        }
    }
}

/// Spawns the reaper on `runtime`.
///
/// Every `interval` (first sweep one interval after spawning) the task
/// computes `cutoff = now - interval`, locks the store and removes entries
/// created strictly before the cutoff. The lock is held only for the sweep.
///
/// # Example
/// ```ignore
/// let store = Arc::new(Mutex::new(CacheStore::new()));
/// let reaper = spawn_reaper(&Handle::current(), store.clone(), Duration::from_secs(5));
/// // Later, during teardown:
/// reaper.shutdown().await;
/// ```
pub fn spawn_reaper(
    runtime: &Handle,
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
) -> Reaper {
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let handle = runtime.spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Measured from the wake-up, not the scheduled tick, in
                    // case the task was delayed.
                    let Some(cutoff) = Instant::now().checked_sub(interval) else {
                        continue;
                    };

                    let removed = store.lock().reap(cutoff);

                    if removed > 0 {
                        debug!("Cache reaper: removed {} expired entries", removed);
                    } else {
                        trace!("Cache reaper: no expired entries found");
                    }
                }
                _ = &mut stop_rx => {
                    debug!("Cache reaper shutting down");
                    break;
                }
            }
        }
    });

    Reaper {
        handle,
        stop: Some(stop_tx),
    }
}
