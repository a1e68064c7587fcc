//! Cache Handle Module
//!
//! `Cache<V>` is the shared, cloneable handle entity clients are constructed
//! with. It owns the store behind `Arc<RwLock<_>>`, carries the read-through
//! helper, and erases its value type behind the `CacheAdmin` trait so typed
//! per-entity caches can share one administration surface.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheNamespace, CacheStats, CacheStore};
use crate::error::Result;

// == Cache Handle ==
/// Thread-safe handle to a typed cache store.
///
/// Constructed at the composition root and handed to each client; there is no
/// process-wide cache instance.
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
}

// Manual impl: `#[derive(Clone)]` would require V: Clone on the handle itself
impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<V> Default for Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a handle around a fresh empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(CacheStore::new())),
        }
    }

    // == Set ==
    /// Stores a value with the given TTL, returning it unchanged.
    pub async fn set(&self, key: &str, value: V, ttl_seconds: u64) -> V {
        let mut store = self.store.write().await;
        store.set(key, value, ttl_seconds)
    }

    // == Get ==
    /// Returns the value if present and unexpired.
    pub async fn get(&self, key: &str) -> Option<V> {
        // Write lock: a read may lazily evict an expired entry
        let mut store = self.store.write().await;
        store.get(key)
    }

    // == Remove ==
    /// Idempotently removes a key from the store and index.
    pub async fn remove(&self, key: &str) {
        let mut store = self.store.write().await;
        store.remove(key);
    }

    // == Clear ==
    /// Removes everything.
    pub async fn clear(&self) {
        let mut store = self.store.write().await;
        store.clear();
    }

    // == Keys ==
    /// All currently-live keys.
    pub async fn keys(&self) -> Vec<String> {
        let store = self.store.read().await;
        store.keys()
    }

    // == Filtered Keys ==
    /// Live keys matching a case-insensitive substring filter.
    pub async fn filtered_keys(&self, filter: &str) -> Vec<String> {
        let store = self.store.read().await;
        store.filtered_keys(filter)
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        store.stats()
    }

    // == Sweep ==
    /// Removes expired entries; returns how many were dropped.
    pub async fn sweep_expired(&self) -> usize {
        let mut store = self.store.write().await;
        store.sweep_expired()
    }

    // == Read-Through ==
    /// The shared lookup-or-fetch step of the read-through contract.
    ///
    /// On a hit the cached value is returned without touching the network.
    /// On a miss the fetch future runs outside the store's critical section;
    /// a successful non-empty result is cached under `key` with `ttl_seconds`
    /// before being returned. A failed fetch propagates its error and an
    /// empty fetch returns `None` — neither ever populates the cache, so
    /// errors and empty responses are never served back as cached data.
    pub async fn get_or_fetch<F>(&self, key: &str, ttl_seconds: u64, fetch: F) -> Result<Option<V>>
    where
        F: Future<Output = Result<Option<V>>>,
    {
        if let Some(value) = self.get(key).await {
            return Ok(Some(value));
        }

        match fetch.await? {
            Some(value) => {
                let value = self.set(key, value, ttl_seconds).await;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Namespace Invalidation ==
    /// Removes every live key owned by the namespace; returns the count.
    ///
    /// Enumerates the Live-Key Index and filters through
    /// [`CacheNamespace::owns`], so keys from other namespaces sharing a
    /// textual prefix are left alone.
    pub async fn invalidate_namespace(&self, namespace: &CacheNamespace) -> usize {
        let matches: Vec<String> = self
            .keys()
            .await
            .into_iter()
            .filter(|key| namespace.owns(key))
            .collect();

        let mut store = self.store.write().await;
        for key in &matches {
            store.remove(key);
        }
        matches.len()
    }
}

// == Admin Trait ==
/// Key-level operations every typed cache exposes to the administration
/// surface and the background sweeper. Value types are erased so caches of
/// different payload types can be registered side by side.
#[async_trait]
pub trait CacheAdmin: Send + Sync {
    /// All currently-live keys.
    async fn keys(&self) -> Vec<String>;

    /// Live keys matching a case-insensitive substring filter.
    async fn filtered_keys(&self, filter: &str) -> Vec<String>;

    /// Idempotent single-key removal.
    async fn remove(&self, key: &str);

    /// Full flush.
    async fn clear(&self);

    /// Current statistics.
    async fn stats(&self) -> CacheStats;

    /// Drop expired entries; returns how many were removed.
    async fn sweep_expired(&self) -> usize;
}

#[async_trait]
impl<V> CacheAdmin for Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn keys(&self) -> Vec<String> {
        Cache::keys(self).await
    }

    async fn filtered_keys(&self, filter: &str) -> Vec<String> {
        Cache::filtered_keys(self, filter).await
    }

    async fn remove(&self, key: &str) {
        Cache::remove(self, key).await;
    }

    async fn clear(&self) {
        Cache::clear(self).await;
    }

    async fn stats(&self) -> CacheStats {
        Cache::stats(self).await
    }

    async fn sweep_expired(&self) -> usize {
        Cache::sweep_expired(self).await
    }
}
