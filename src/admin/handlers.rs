//! Admin Handlers
//!
//! HTTP request handlers for the cache administration surface: read-only key
//! listing plus manual removal and flush, for operational visibility when
//! automatic invalidation is suspected to have missed a case.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::CacheRegistry;
use crate::models::{
    ClearResponse, HealthResponse, KeysResponse, ListKeysParams, RemoveResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registry of every cache the host application constructed
    pub registry: Arc<CacheRegistry>,
}

impl AppState {
    /// Creates a new AppState over the given registry.
    pub fn new(registry: Arc<CacheRegistry>) -> Self {
        Self { registry }
    }
}

/// Handler for GET /cache/keys
///
/// Lists live keys across all registered caches, optionally restricted by a
/// case-insensitive substring filter.
pub async fn list_keys_handler(
    State(state): State<AppState>,
    Query(params): Query<ListKeysParams>,
) -> Json<KeysResponse> {
    let filter = params.filter.unwrap_or_default();
    let keys = state.registry.filtered_keys(&filter).await;

    Json(KeysResponse::new(keys))
}

/// Handler for DELETE /cache/keys/:key
///
/// Removes a single key. Succeeds even if the key is already gone.
pub async fn remove_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<RemoveResponse> {
    state.registry.remove(&key).await;
    info!("Cache key '{}' removed by operator", key);

    Json(RemoveResponse::new(key))
}

/// Handler for DELETE /cache
///
/// Flushes every registered cache.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.registry.clear().await;
    info!("Cache cleared by operator");

    Json(ClearResponse::new())
}

/// Handler for GET /cache/stats
///
/// Returns statistics aggregated across all registered caches.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.registry.stats().await;

    Json(StatsResponse::new(&stats))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
