//! Cache Registry Module
//!
//! Collects the per-entity typed caches behind their `CacheAdmin` facade so
//! the administration surface and the background sweeper see one key space.
//!
//! Namespaced keys are disjoint across entity caches, so union listing cannot
//! produce duplicates; removal is broadcast and relies on per-cache removal
//! being idempotent.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::{CacheAdmin, CacheStats};

// == Cache Registry ==
/// Named collection of registered caches. Owned by the host application's
/// composition root and injected wherever cross-cache visibility is needed.
#[derive(Default)]
pub struct CacheRegistry {
    caches: RwLock<Vec<(String, Arc<dyn CacheAdmin>)>>,
}

impl CacheRegistry {
    // == Constructor ==
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            caches: RwLock::new(Vec::new()),
        }
    }

    // == Register ==
    /// Registers a cache under a display name (typically its namespace).
    pub async fn register(&self, name: &str, cache: Arc<dyn CacheAdmin>) {
        let mut caches = self.caches.write().await;
        caches.push((name.to_string(), cache));
    }

    // == Keys ==
    /// Union of live keys across all registered caches.
    pub async fn keys(&self) -> Vec<String> {
        let caches = self.caches.read().await;
        let mut keys = Vec::new();
        for (_, cache) in caches.iter() {
            keys.extend(cache.keys().await);
        }
        keys
    }

    // == Filtered Keys ==
    /// Union of live keys matching a case-insensitive substring filter.
    pub async fn filtered_keys(&self, filter: &str) -> Vec<String> {
        let caches = self.caches.read().await;
        let mut keys = Vec::new();
        for (_, cache) in caches.iter() {
            keys.extend(cache.filtered_keys(filter).await);
        }
        keys
    }

    // == Remove ==
    /// Removes a key from every registered cache. At most one cache holds
    /// the key; for the rest the removal is a no-op.
    pub async fn remove(&self, key: &str) {
        let caches = self.caches.read().await;
        for (_, cache) in caches.iter() {
            cache.remove(key).await;
        }
    }

    // == Clear ==
    /// Flushes every registered cache.
    pub async fn clear(&self) {
        let caches = self.caches.read().await;
        for (_, cache) in caches.iter() {
            cache.clear().await;
        }
    }

    // == Stats ==
    /// Aggregated statistics across all registered caches.
    pub async fn stats(&self) -> CacheStats {
        let caches = self.caches.read().await;
        let mut total = CacheStats::new();
        for (_, cache) in caches.iter() {
            total.merge(&cache.stats().await);
        }
        total
    }

    // == Sweep ==
    /// Sweeps expired entries from every registered cache; returns the total
    /// number removed.
    pub async fn sweep_expired(&self) -> usize {
        let caches = self.caches.read().await;
        let mut removed = 0;
        for (_, cache) in caches.iter() {
            removed += cache.sweep_expired().await;
        }
        removed
    }

    // == Names ==
    /// Display names of the registered caches, in registration order.
    pub async fn names(&self) -> Vec<String> {
        let caches = self.caches.read().await;
        caches.iter().map(|(name, _)| name.clone()).collect()
    }
}
