//! API Handlers
//!
//! HTTP request handlers for each cache service endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{saturating_millis, BoundedTtlCache, SharedCache};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, GetResponse, HealthResponse, InvalidateResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
///
/// Holds one cache of JSON values behind a single lock.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache
    pub cache: SharedCache<Value>,
    /// TTL for requests that don't carry one
    pub default_ttl: Duration,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: BoundedTtlCache<String, Value>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            default_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = BoundedTtlCache::new(config.capacity)?;
        Ok(Self::new(cache, config.default_ttl()))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value, using the default TTL when none is given.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl(state.default_ttl);
    state.cache.write().await.set(req.key.clone(), req.value, ttl);
    let ttl_ms = saturating_millis(ttl);
    debug!(key = %req.key, ttl_ms, "stored entry");

    Ok(Json(SetResponse::new(req.key, ttl_ms)))
}

/// Handler for GET /get/:key
///
/// Retrieves a live value; missing and expired keys are both 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: a hit bumps recency and stats
    let mut cache = state.cache.write().await;
    let value = cache
        .get(&key)
        .cloned()
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;
    let ttl_remaining_ms = cache.ttl_remaining(&key).map(saturating_millis);

    Ok(Json(GetResponse::new(key, value, ttl_remaining_ms)))
}

/// Handler for DELETE /del/:key
///
/// Invalidation is idempotent: absent keys succeed with `removed: false`.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state.cache.write().await.invalidate(&key);
    Json(InvalidateResponse::new(key, removed))
}

/// Handler for DELETE /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    let removed = cache.size();
    cache.clear();
    Json(ClearResponse::new(removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(StatsResponse::from(stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
