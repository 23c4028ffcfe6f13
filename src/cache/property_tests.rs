//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model and
//! against its capacity, expiry and invalidation guarantees.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{BoundedTtlCache, ManualClock};

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(3600);

type TestCache = BoundedTtlCache<String, u32, ManualClock>;

fn test_cache(capacity: usize) -> (TestCache, ManualClock) {
    let clock = ManualClock::new();
    let cache = BoundedTtlCache::with_clock(capacity, clock.clone()).unwrap();
    (cache, clock)
}

// == Strategies ==
/// Small key space so operations collide often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]".prop_map(|s| s)
}

/// Keys drawn from a wide space, for distinct-key sequences
fn wide_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

// == Reference Model ==
/// Entries ordered from least to most recently used.
#[derive(Debug, Default)]
struct LruModel {
    order: Vec<(String, u32)>,
    capacity: usize,
}

impl LruModel {
    fn position(&self, key: &str) -> Option<usize> {
        self.order.iter().position(|(k, _)| k == key)
    }

    fn set(&mut self, key: String, value: u32) {
        if let Some(pos) = self.position(&key) {
            self.order.remove(pos);
        } else if self.order.len() >= self.capacity {
            self.order.remove(0);
        }
        self.order.push((key, value));
    }

    fn get(&mut self, key: &str) -> Option<u32> {
        let pos = self.position(key)?;
        let entry = self.order.remove(pos);
        let value = entry.1;
        self.order.push(entry);
        Some(value)
    }

    fn invalidate(&mut self, key: &str) {
        if let Some(pos) = self.position(key) {
            self.order.remove(pos);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any interleaving of set/get/invalidate behaves like a plain LRU list.
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, _clock) = test_cache(capacity);
        let mut model = LruModel { capacity, ..LruModel::default() };
        let mut expected_hits = 0u64;
        let mut expected_misses = 0u64;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(key.clone(), value, LONG_TTL);
                    model.set(key, value);
                }
                CacheOp::Get { key } => {
                    let expected = model.get(&key);
                    match expected {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                    prop_assert_eq!(cache.get(key.as_str()).copied(), expected);
                }
                CacheOp::Invalidate { key } => {
                    cache.invalidate(key.as_str());
                    model.invalidate(&key);
                }
            }
            prop_assert_eq!(cache.size(), model.order.len());
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits);
        prop_assert_eq!(stats.misses, expected_misses);
        prop_assert_eq!(stats.total_entries, cache.size());
    }

    // The number of entries SHALL never exceed the capacity.
    #[test]
    fn prop_capacity_enforcement(
        capacity in 1usize..20,
        keys in prop::collection::vec(wide_key_strategy(), 1..200)
    ) {
        let (mut cache, _clock) = test_cache(capacity);

        for (i, key) in keys.into_iter().enumerate() {
            cache.set(key, i as u32, LONG_TTL);
            prop_assert!(
                cache.size() <= capacity,
                "Cache size {} exceeds capacity {}",
                cache.size(),
                capacity
            );
        }
    }

    // Storing then reading before the TTL elapses returns the stored value.
    #[test]
    fn prop_roundtrip_storage(
        key in wide_key_strategy(),
        value in any::<u32>(),
        ttl_ms in 1u64..10_000,
        elapsed_ms in 0u64..10_000
    ) {
        prop_assume!(elapsed_ms < ttl_ms);
        let (mut cache, clock) = test_cache(8);

        cache.set(key.clone(), value, Duration::from_millis(ttl_ms));
        clock.advance(Duration::from_millis(elapsed_ms));

        prop_assert_eq!(cache.get(key.as_str()).copied(), Some(value));
    }

    // Once the TTL has elapsed the key is a miss and no longer counted.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in wide_key_strategy(),
        ttl_ms in 0u64..10_000,
        overshoot_ms in 0u64..10_000
    ) {
        let (mut cache, clock) = test_cache(8);

        cache.set(key.clone(), 1, Duration::from_millis(ttl_ms));
        clock.advance(Duration::from_millis(ttl_ms + overshoot_ms));

        prop_assert_eq!(cache.get(key.as_str()), None);
        prop_assert_eq!(cache.size(), 0);
    }

    // Overwriting a present key never changes size or evicts a third key.
    #[test]
    fn prop_overwrite_does_not_evict(
        keys in prop::collection::hash_set(wide_key_strategy(), 1..10),
        pick in any::<prop::sample::Index>(),
        value in any::<u32>()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (mut cache, _clock) = test_cache(keys.len());

        for key in &keys {
            cache.set(key.clone(), 0, LONG_TTL);
        }
        let before = cache.size();

        let target = pick.get(&keys).clone();
        cache.set(target.clone(), value, LONG_TTL);

        prop_assert_eq!(cache.size(), before);
        prop_assert_eq!(cache.stats().evictions, 0);
        for key in &keys {
            prop_assert!(cache.contains(key.as_str()), "Key '{}' should still exist", key);
        }
        prop_assert_eq!(cache.get(target.as_str()).copied(), Some(value));
    }

    // Invalidating twice leaves the same state as invalidating once.
    #[test]
    fn prop_invalidate_idempotent(
        keys in prop::collection::hash_set(wide_key_strategy(), 1..10),
        pick in any::<prop::sample::Index>()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (mut cache, _clock) = test_cache(16);
        for key in &keys {
            cache.set(key.clone(), 1, LONG_TTL);
        }

        let target = pick.get(&keys).clone();
        cache.invalidate(target.as_str());
        let size_once = cache.size();
        let live_once: HashSet<&String> =
            keys.iter().filter(|k| cache.contains(k.as_str())).collect();

        prop_assert!(!cache.invalidate(target.as_str()));
        prop_assert_eq!(cache.size(), size_once);
        let live_twice: HashSet<&String> =
            keys.iter().filter(|k| cache.contains(k.as_str())).collect();
        prop_assert_eq!(live_once, live_twice);
    }

    // With a full cache, the first-inserted key is evicted unless a read refreshed it.
    #[test]
    fn prop_lru_access_tracking(
        keys in prop::collection::hash_set(wide_key_strategy(), 3..8),
        pick in any::<prop::sample::Index>(),
        new_key in wide_key_strategy()
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        prop_assume!(!keys.contains(&new_key));

        let (mut cache, _clock) = test_cache(keys.len());
        for key in &keys {
            cache.set(key.clone(), 0, LONG_TTL);
        }

        let accessed = pick.get(&keys).clone();
        prop_assert!(cache.get(accessed.as_str()).is_some());

        cache.set(new_key.clone(), 1, LONG_TTL);

        let expected_victim = if accessed == keys[0] { &keys[1] } else { &keys[0] };
        prop_assert!(!cache.contains(expected_victim.as_str()));
        prop_assert!(cache.contains(accessed.as_str()));
        prop_assert!(cache.contains(new_key.as_str()));
        prop_assert_eq!(cache.size(), keys.len());
    }
}
