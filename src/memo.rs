//! Memoizer
//!
//! Wraps a shared cache around fallible async calls: look the key up, fall
//! through to the call on a miss, and keep successful results for a TTL.
//!
//! Concurrent misses on the same key each run their own fetch; the last
//! write wins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::cache::{BoundedTtlCache, Clock, SharedCache, SystemClock};
use crate::error::Result;

/// TTL used when the caller does not pick one.
pub const DEFAULT_MEMO_TTL: Duration = Duration::from_secs(300);

// == Cache Key ==
/// Builds a memoization key from a call name and its arguments.
///
/// The key is the JSON text of `{"fn": name, "deps": args}`, so equal
/// arguments always produce equal keys.
pub fn cache_key<A: Serialize + ?Sized>(name: &str, args: &A) -> Result<String> {
    let key = serde_json::to_string(&KeyParts { name, deps: args })?;
    Ok(key)
}

#[derive(Serialize)]
struct KeyParts<'a, A: ?Sized> {
    #[serde(rename = "fn")]
    name: &'a str,
    deps: &'a A,
}

// == Memoizer ==
/// Memoizing front for slow or rate-limited remote calls.
pub struct Memoizer<V, C = SystemClock> {
    cache: SharedCache<V, C>,
    ttl: Duration,
    enabled: bool,
}

impl<V, C> Clone for Memoizer<V, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            ttl: self.ttl,
            enabled: self.enabled,
        }
    }
}

impl<V> Memoizer<V, SystemClock>
where
    V: Clone,
{
    /// Creates a memoizer backed by its own cache of `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_shared(
            Arc::new(RwLock::new(BoundedTtlCache::new(capacity)?)),
            DEFAULT_MEMO_TTL,
        ))
    }
}

impl<V, C> Memoizer<V, C>
where
    V: Clone,
    C: Clock,
{
    /// Creates a memoizer over an existing shared cache.
    pub fn from_shared(cache: SharedCache<V, C>, ttl: Duration) -> Self {
        Self {
            cache,
            ttl,
            enabled: true,
        }
    }

    /// Sets the TTL applied by `get_or_fetch`.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Turns caching on or off. A disabled memoizer always calls through
    /// and stores nothing.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Handle to the underlying cache.
    pub fn cache(&self) -> &SharedCache<V, C> {
        &self.cache
    }

    // == Get Or Fetch ==
    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// success for the default TTL.
    pub async fn get_or_fetch<F, Fut, E>(&self, key: &str, fetch: F) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        self.get_or_fetch_with_ttl(key, self.ttl, fetch).await
    }

    /// Same as `get_or_fetch` with an explicit TTL.
    ///
    /// The lock is released while `fetch` runs. Errors are returned as-is
    /// and never cached.
    pub async fn get_or_fetch_with_ttl<F, Fut, E>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> std::result::Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<V, E>>,
    {
        if !self.enabled {
            return fetch().await;
        }

        let cached = self.cache.write().await.get(key).cloned();
        if let Some(value) = cached {
            trace!(key, "memo hit");
            return Ok(value);
        }

        debug!(key, "memo miss, fetching");
        let value = fetch().await?;
        self.cache
            .write()
            .await
            .set(key.to_string(), value.clone(), ttl);
        Ok(value)
    }

    /// Drops the cached value for `key`.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.write().await.invalidate(key)
    }

    /// Drops every cached value.
    pub async fn clear(&self) {
        self.cache.write().await.clear();
    }
}
