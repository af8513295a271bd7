//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of their owner.
//!
//! # Tasks
//! - Cache Reaper: Removes cache entries older than the cache interval

mod reaper;

pub use reaper::{spawn_reaper, Reaper};
