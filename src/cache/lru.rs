//! LRU Tracker Module
//!
//! Implements Least Recently Used tracking for cache eviction.

use std::collections::BTreeMap;

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// Every access hands out a fresh, strictly increasing stamp and keys are
/// ordered by stamp:
/// - Lowest stamp = Least recently used
/// - Highest stamp = Most recently used
///
/// Callers keep the stamp alongside their entry and pass it back on the next
/// touch or removal, so no operation has to scan the order.
#[derive(Debug)]
pub struct LruTracker<K> {
    /// Keys by access stamp
    order: BTreeMap<u64, K>,
    /// Next stamp to hand out
    next_stamp: u64,
}

impl<K> LruTracker<K> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
            next_stamp: 0,
        }
    }

    // == Push ==
    /// Tracks a key as most recently used and returns its stamp.
    ///
    /// The key must not already be tracked; use `touch` for known keys.
    pub fn push(&mut self, key: K) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.order.insert(stamp, key);
        stamp
    }

    // == Touch ==
    /// Marks the key held under `stamp` as most recently used.
    ///
    /// Returns the key's new stamp. An unknown stamp is returned unchanged.
    pub fn touch(&mut self, stamp: u64) -> u64 {
        match self.order.remove(&stamp) {
            Some(key) => self.push(key),
            None => stamp,
        }
    }

    // == Remove ==
    /// Stops tracking the key held under `stamp`.
    pub fn remove(&mut self, stamp: u64) -> Option<K> {
        self.order.remove(&stamp)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<K> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&K> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    // == Clear ==
    /// Forgets every tracked key. Stamps keep increasing.
    pub fn clear(&mut self) {
        self.order.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<K> Default for LruTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
