//! Cache Store Module
//!
//! Core TTL store combining HashMap storage with the Live-Key Index.

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, LiveKeyIndex};

// == Cache Store ==
/// Typed key/value store with per-key absolute expiry.
///
/// Eviction is dual-trigger: `get` re-checks expiry on every read (no stale
/// read ever succeeds) and `sweep_expired` periodically removes dead entries
/// so the index does not grow unbounded. Either trigger may fire first; the
/// other is a no-op. The value map and the index are always mutated together
/// under the same `&mut self`, so callers never observe them out of step.
#[derive(Debug, Default)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Live-key bookkeeping
    index: LiveKeyIndex,
    /// Performance statistics
    stats: CacheStats,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new empty CacheStore.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            index: LiveKeyIndex::new(),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair with the given TTL in seconds.
    ///
    /// If the key already exists the value is overwritten and the TTL reset.
    /// Returns the stored value unchanged so fluent call sites can populate
    /// and return in one expression. A TTL of zero inserts an entry that is
    /// already expired. There is no error case.
    pub fn set(&mut self, key: &str, value: V, ttl_seconds: u64) -> V {
        let entry = CacheEntry::new(value.clone(), ttl_seconds);
        self.index.record(key, entry.expires_at);
        self.entries.insert(key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());
        value
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or expired. An expired entry is
    /// treated as absent whether or not the sweep has physically removed it
    /// yet, and is lazily evicted from both structures here.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.index.on_evict(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_eviction();
                self.stats.record_miss();
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Removes an entry from both the value store and the index.
    ///
    /// Idempotent: removing an absent key is a no-op, not an error.
    pub fn remove(&mut self, key: &str) {
        self.entries.remove(key);
        self.index.on_evict(key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Removes everything. Used by the administration surface only.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.stats.set_total_entries(0);
    }

    // == Keys ==
    /// Returns all currently-live keys, order unspecified.
    ///
    /// Answered from the index alone so listing keys never touches values.
    pub fn keys(&self) -> Vec<String> {
        self.index.live_keys(current_timestamp_ms())
    }

    // == Filtered Keys ==
    /// Returns live keys containing `filter` (case-insensitive substring);
    /// a blank filter is no filter.
    pub fn filtered_keys(&self, filter: &str) -> Vec<String> {
        self.index.filtered_keys(filter, current_timestamp_ms())
    }

    // == Sweep Expired ==
    /// Removes all expired entries from both structures.
    ///
    /// Returns the number of entries removed. Re-reads each entry's current
    /// `expires_at`, so an entry overwritten with a fresh TTL since the sweep
    /// was scheduled is left alone.
    pub fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.index.on_evict(&key);
            self.stats.record_eviction();
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, expired-but-unswept included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Force Expire (test support) ==
    /// Backdates an entry's expiry in both structures, standing in for
    /// elapsed wall-clock time in tests.
    #[cfg(test)]
    pub(crate) fn force_expire(&mut self, key: &str) {
        let now = current_timestamp_ms();
        if let Some(entry) = self.entries.get_mut(key) {
            entry.expires_at = now;
            self.index.record(key, now);
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        let value = store.get("key1");

        assert_eq!(value, Some("value1".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_returns_stored_value() {
        let mut store = CacheStore::new();

        let stored = store.set("key1", vec![1, 2, 3], 300);
        assert_eq!(stored, vec![1, 2, 3]);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store: CacheStore<String> = CacheStore::new();

        assert_eq!(store.get("nonexistent"), None);
    }

    #[test]
    fn test_store_remove() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.remove("key1");

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_remove_is_idempotent() {
        let mut store: CacheStore<String> = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.remove("key1");
        store.remove("key1");
        store.remove("never_existed");

        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_overwrite_resets_ttl() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.set("key1", "value2".to_string(), 600);

        assert_eq!(store.get("key1"), Some("value2".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys(), vec!["key1"]);
    }

    #[test]
    fn test_store_expired_read_is_absent() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.force_expire("key1");

        // Expired entry must be invisible even though no sweep has run
        assert_eq!(store.get("key1"), None);
        // And the lazy check evicted it from both structures
        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_zero_ttl_immediately_absent() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 0);

        assert_eq!(store.get("key1"), None);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.set("key2", "value2".to_string(), 300);
        store.clear();

        assert!(store.is_empty());
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_keys_excludes_expired() {
        let mut store = CacheStore::new();

        store.set("live", "value".to_string(), 300);
        store.set("dead", "value".to_string(), 300);
        store.force_expire("dead");

        assert_eq!(store.keys(), vec!["live"]);
    }

    #[test]
    fn test_store_filtered_keys() {
        let mut store = CacheStore::new();

        store.set("Airports.1", "value".to_string(), 300);
        store.set("Manufacturers.1", "value".to_string(), 300);

        assert_eq!(store.filtered_keys("airport"), vec!["Airports.1"]);
        assert_eq!(store.filtered_keys("").len(), 2);
    }

    #[test]
    fn test_store_sweep_expired() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.set("key2", "value2".to_string(), 300);
        store.force_expire("key1");

        let removed = store.sweep_expired();
        assert_eq!(removed, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("key2"), Some("value2".to_string()));
    }

    #[test]
    fn test_sweep_then_lazy_removal_agree() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.force_expire("key1");

        // Lazy eviction fires first; sweep afterwards is a no-op
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_expired_read_counts_miss_and_eviction() {
        let mut store = CacheStore::new();

        store.set("key1", "value1".to_string(), 300);
        store.force_expire("key1");
        store.get("key1");

        let stats = store.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
    }
}
