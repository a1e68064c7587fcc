//! Response DTOs for the cache administration API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the key-listing operation (GET /cache/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Live cache keys, optionally filtered
    pub keys: Vec<String>,
    /// Number of keys returned
    pub count: usize,
}

impl KeysResponse {
    /// Creates a new KeysResponse
    pub fn new(mut keys: Vec<String>) -> Self {
        // Stable output for operators and tests; store order is unspecified
        keys.sort();
        let count = keys.len();
        Self { keys, count }
    }
}

/// Response body for single-key removal (DELETE /cache/keys/:key)
#[derive(Debug, Clone, Serialize)]
pub struct RemoveResponse {
    /// Success message
    pub message: String,
    /// The key that was removed
    pub key: String,
}

impl RemoveResponse {
    /// Creates a new RemoveResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("'{}' has been removed from the cache", key),
            key,
        }
    }
}

/// Response body for the full flush (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Success message
    pub message: String,
}

impl ClearResponse {
    /// Creates a new ClearResponse
    pub fn new() -> Self {
        Self {
            message: "The cache has been cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits across all registered caches
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of TTL evictions
    pub evictions: u64,
    /// Current number of entries
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from aggregated statistics
    pub fn new(stats: &crate::cache::CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
