//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Clock reading at insertion
    pub inserted_at: Instant,
    /// Expiration instant, None = beyond the clock's range (never expires by time)
    pub expires_at: Option<Instant>,
    /// Recency stamp assigned by the LRU tracker
    pub(crate) stamp: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry inserted at `now` that lives for `ttl`.
    ///
    /// A zero `ttl` produces an entry that is already expired.
    pub fn new(value: V, now: Instant, ttl: Duration, stamp: u64) -> Self {
        Self {
            value,
            inserted_at: now,
            expires_at: now.checked_add(ttl),
            stamp,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so an
    /// entry is never served at the exact instant its TTL elapses.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry is still live
    /// - `None` if the entry has no reachable expiry
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(now))
    }
}
