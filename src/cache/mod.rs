//! Cache Module
//!
//! Provides a capacity-bounded in-memory cache with TTL expiration and LRU eviction.

mod clock;
mod entry;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{saturating_millis, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;

use std::sync::Arc;
use tokio::sync::RwLock;

/// A cache keyed by string, shared behind one async lock.
///
/// `get` needs the write half because it updates recency and statistics.
pub type SharedCache<V, C = SystemClock> = Arc<RwLock<BoundedTtlCache<String, V, C>>>;
