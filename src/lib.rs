//! Spicy Cache - bounded in-memory cache for memoizing remote calls
//!
//! Provides a capacity-bounded cache with lazy TTL expiration and LRU
//! eviction, a memoizing wrapper for async calls, an opt-in expiry sweep,
//! and a small HTTP service hosting one shared cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedTtlCache, Clock, ManualClock, SharedCache, SystemClock};
pub use config::Config;
pub use error::{CacheError, Result};
pub use memo::{cache_key, Memoizer};
pub use tasks::spawn_sweep_task;
