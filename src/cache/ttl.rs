//! TTL Cache Module
//!
//! Thread-safe key to bytes cache whose entries are reclaimed by a
//! background reaper once they are older than the cache interval.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::{spawn_reaper, Reaper};

// == Cache ==
/// Time-expiring response cache.
///
/// `add` and `get` are plain synchronous calls that may be made from any
/// thread. Expiry is enforced only by the reaper: an entry older than the
/// interval stays readable until the next sweep removes it, so a reader may
/// observe a stale entry for up to one extra interval.
///
/// The reaper stops on [`Cache::shutdown`] or when the cache is dropped.
#[derive(Debug)]
pub struct Cache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    reaper: Reaper,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache and starts its reaper on the current Tokio runtime.
    ///
    /// # Errors
    /// - [`PokedexError::InvalidInterval`] if `interval` is zero
    /// - [`PokedexError::NoRuntime`] if called outside a Tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PokedexError::InvalidInterval);
        }
        let runtime = Handle::try_current().map_err(|_| PokedexError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let reaper = spawn_reaper(&runtime, Arc::clone(&store), interval);

        Ok(Self {
            store,
            interval,
            reaper,
        })
    }

    // == Add ==
    /// Inserts or replaces the payload under `key`, stamped with now.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        let (key, value) = (key.into(), value.into());
        self.store.lock().add(key, value);
    }

    // == Get ==
    /// Returns a copy of the payload under `key`, whatever its age.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.lock().get(key)
    }

    /// The eviction interval fixed at construction.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to exit.
    pub async fn shutdown(self) {
        self.reaper.shutdown().await;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Weak;
    use std::thread;
    use std::time::Instant as StdInstant;

    use tokio::time::sleep;

    async fn wait_until_released(weak: &Weak<Mutex<CacheStore>>) -> bool {
        for _ in 0..50 {
            if weak.upgrade().is_none() {
                return true;
            }
            sleep(Duration::from_millis(1)).await;
        }
        weak.upgrade().is_none()
    }

    #[tokio::test]
    async fn test_new_rejects_zero_interval() {
        let result = Cache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidInterval)));
    }

    #[test]
    fn test_new_requires_runtime() {
        let result = Cache::new(Duration::from_secs(1));
        assert!(matches!(result, Err(PokedexError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_add_get_round_trip() {
        let cache = Cache::new(Duration::from_secs(3600)).unwrap();
        let cases: [(&str, &[u8]); 4] = [
            ("first", b"hello"),
            ("second", b""),
            ("third", b" "),
            ("fourth", b"543!@"),
        ];

        for (key, value) in cases {
            cache.add(key, value);
            assert_eq!(cache.get(key), Some(value.to_vec()), "key {key}");
        }
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.interval(), Duration::from_secs(3600));

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_absent_key() {
        let cache = Cache::new(Duration::from_secs(3600)).unwrap();
        cache.add("1", "1");

        assert_eq!(cache.get(""), None);
        assert_eq!(cache.get("2"), None);

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let cache = Cache::new(Duration::from_secs(3600)).unwrap();

        cache.add("k", vec![1, 2, 3]);
        cache.add("k", vec![9]);

        assert_eq!(cache.get("k"), Some(vec![9]));
        assert_eq!(cache.len(), 1);

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_returns_independent_copy() {
        let cache = Cache::new(Duration::from_secs(3600)).unwrap();
        cache.add("k", vec![1, 2, 3]);

        let mut copy = cache.get("k").unwrap();
        copy[0] = 42;

        assert_eq!(cache.get("k"), Some(vec![1, 2, 3]));

        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_survives_before_first_sweep() {
        let cache = Cache::new(Duration::from_millis(50)).unwrap();

        cache.add("k", vec![1, 2, 3]);
        sleep(Duration::from_millis(10)).await;

        assert_eq!(cache.get("k"), Some(vec![1, 2, 3]));

        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_reaped_then_fresh_entry_kept() {
        let cache = Cache::new(Duration::from_millis(1)).unwrap();

        cache.add("one", vec![32]);
        sleep(Duration::from_millis(3)).await;

        assert_eq!(cache.get("one"), None, "entry one should have been reaped");

        cache.add("two", vec![32]);
        assert_eq!(cache.get("two"), Some(vec![32]));

        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_entry_readable_until_next_sweep() {
        let cache = Cache::new(Duration::from_millis(50)).unwrap();
        cache.add("k", vec![7]);

        // Sweep at 50ms sees the entry exactly one interval old and keeps it
        sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k"), Some(vec![7]));

        // Sweep at 100ms removes it
        sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("k"), None);

        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_lookups_and_reaping() {
        let cache = Cache::new(Duration::from_millis(10)).unwrap();

        cache.add("a", "x");
        cache.add("b", "y");
        cache.get("a");
        cache.get("missing");
        sleep(Duration::from_millis(25)).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.reaped, 2);
        assert_eq!(stats.total_entries, 0);
        assert!(cache.is_empty());

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_releases_reaper() {
        let cache = Cache::new(Duration::from_millis(5)).unwrap();
        let weak = Arc::downgrade(&cache.store);

        cache.shutdown().await;

        assert!(weak.upgrade().is_none());
    }

    #[tokio::test]
    async fn test_drop_stops_reaper() {
        let cache = Cache::new(Duration::from_millis(5)).unwrap();
        let weak = Arc::downgrade(&cache.store);

        drop(cache);

        assert!(wait_until_released(&weak).await, "reaper leaked after drop");
    }

    #[tokio::test]
    async fn test_repeated_construction_leaks_no_tasks() {
        let mut handles = Vec::new();
        for _ in 0..100 {
            let cache = Cache::new(Duration::from_millis(1)).unwrap();
            handles.push(Arc::downgrade(&cache.store));
            cache.shutdown().await;
        }

        assert!(handles.iter().all(|weak| weak.upgrade().is_none()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_writers_and_readers() {
        const WRITERS: usize = 4;
        const READERS: usize = 4;
        const KEYS_PER_WRITER: usize = 200;

        let cache = Cache::new(Duration::from_millis(2)).unwrap();
        let deadline = StdInstant::now() + Duration::from_millis(40);

        let lookups: usize = thread::scope(|scope| {
            for writer in 0..WRITERS {
                let cache = &cache;
                scope.spawn(move || {
                    while StdInstant::now() < deadline {
                        for n in 0..KEYS_PER_WRITER {
                            let key = format!("w{writer}-{n}");
                            cache.add(key.clone(), key.into_bytes());
                        }
                    }
                });
            }

            let readers: Vec<_> = (0..READERS)
                .map(|reader| {
                    let cache = &cache;
                    scope.spawn(move || {
                        let mut count = 0;
                        while StdInstant::now() < deadline {
                            let key = format!("w{}-{}", count % WRITERS, (count + reader) % KEYS_PER_WRITER);
                            if let Some(value) = cache.get(&key) {
                                assert_eq!(value, key.as_bytes(), "corrupted value for {key}");
                            }
                            count += 1;
                        }
                        count
                    })
                })
                .collect();

            readers.into_iter().map(|r| r.join().unwrap()).sum()
        });

        let stats = cache.stats();
        assert_eq!((stats.hits + stats.misses) as usize, lookups);

        // Still responsive after the run
        cache.add("after", vec![1]);
        assert_eq!(cache.get("after"), Some(vec![1]));

        cache.shutdown().await;
    }
}
