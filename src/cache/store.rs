//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, LruTracker, SystemClock};
use crate::error::{CacheError, Result};

// == Bounded TTL Cache ==
/// Capacity-bounded key/value store with LRU eviction and per-entry TTL.
///
/// Expiry is lazy: a stale entry is dropped the first time `get` sees it, so
/// `size()` is an upper bound on the number of live entries. Nothing here
/// locks; share an instance behind a single lock at the call boundary.
#[derive(Debug)]
pub struct BoundedTtlCache<K, V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: NonZeroUsize,
    /// Time source for expiry
    clock: C,
}

impl<K, V> BoundedTtlCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries, timed by the system clock.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<K, V, C> BoundedTtlCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates a cache timed by `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CacheError::InvalidCapacity(capacity))?;
        Ok(Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(capacity.get()),
            capacity,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a live value by key and marks it most recently used.
    ///
    /// An expired entry is removed on the spot and reported as a miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.stamp = self.lru.touch(entry.stamp);
        self.stats.record_hit();
        Some(&entry.value)
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl`.
    ///
    /// An existing key is replaced by a fresh entry and never causes an
    /// eviction. A new key arriving at capacity first evicts the least
    /// recently used entry. A zero `ttl` stores an already-expired entry.
    pub fn set(&mut self, key: K, value: V, ttl: Duration) {
        let now = self.clock.now();

        if let Some(entry) = self.entries.get_mut(&key) {
            let stamp = self.lru.touch(entry.stamp);
            *entry = CacheEntry::new(value, now, ttl, stamp);
            return;
        }

        if self.entries.len() >= self.capacity.get() {
            if let Some(evicted) = self.lru.evict_oldest() {
                self.entries.remove(&evicted);
                self.stats.record_eviction();
            }
        }

        let stamp = self.lru.push(key.clone());
        self.entries.insert(key, CacheEntry::new(value, now, ttl, stamp));
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Returns whether an entry was present.
    pub fn invalidate<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
    }

    // == Contains ==
    /// Checks for a live entry without touching recency or statistics.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Time To Live ==
    /// Remaining lifetime of a live entry.
    ///
    /// None when the key is missing, expired, or has no reachable expiry.
    pub fn ttl_remaining<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| entry.ttl_remaining(now))
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired: Vec<(K, u64)> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, entry)| (key.clone(), entry.stamp))
            .collect();

        for (key, stamp) in &expired {
            self.entries.remove(key);
            self.lru.remove(*stamp);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Size ==
    /// Returns the current number of stored entries, expired-but-untouched included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    fn remove_entry<Q>(&mut self, key: &Q) -> Option<CacheEntry<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entry = self.entries.remove(key)?;
        self.lru.remove(entry.stamp);
        Some(entry)
    }
}
