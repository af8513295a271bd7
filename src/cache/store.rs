//! Cache Store Module
//!
//! The unsynchronized map behind [`Cache`](super::Cache). All access goes
//! through the cache's mutex; the store itself knows nothing about locking
//! or timers.

use std::collections::HashMap;

use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to payload map with lookup statistics.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and reaper counters
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Add ==
    /// Inserts or replaces the entry under `key`.
    ///
    /// An existing entry is replaced entirely; its value and creation
    /// instant are both refreshed.
    pub fn add(&mut self, key: String, value: Vec<u8>) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Returns a copy of the value stored under `key`.
    ///
    /// Age is not checked here; stale entries stay readable until reaped.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Reap ==
    /// Removes every entry created strictly before `cutoff`.
    ///
    /// Returns the number of entries removed.
    pub fn reap(&mut self, cutoff: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_older_than(cutoff));
        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
