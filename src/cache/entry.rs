//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload and the instant it was inserted.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, owned by the entry
    pub value: Vec<u8>,
    /// Insertion instant (Tokio clock, so a paused test clock applies)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            created_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since the entry was inserted.
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    // == Is Older Than ==
    /// Checks whether the entry was created strictly before `cutoff`.
    ///
    /// An entry created exactly at the cutoff is not considered older.
    pub fn is_older_than(&self, cutoff: Instant) -> bool {
        self.created_at < cutoff
    }
}
