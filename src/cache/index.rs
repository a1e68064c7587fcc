//! Live-Key Index Module
//!
//! Tracks which keys are currently unexpired so enumeration and filtering
//! never have to walk the (possibly large) value store.

use std::collections::HashMap;

// == Live-Key Index ==
/// Parallel key -> expiry map mirroring the value store.
///
/// The store records every insertion here and notifies the index through
/// `on_evict` whenever an entry leaves, whatever the reason (explicit removal,
/// lazy expiry on read, or the background sweep). Both structures are only
/// ever mutated together under the store's borrow, so they cannot diverge.
#[derive(Debug, Default)]
pub struct LiveKeyIndex {
    /// Expiry timestamp (Unix milliseconds) per key
    keys: HashMap<String, u64>,
}

impl LiveKeyIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
        }
    }

    // == Record ==
    /// Records a key with its expiry timestamp, replacing any previous entry.
    pub fn record(&mut self, key: &str, expires_at: u64) {
        self.keys.insert(key.to_string(), expires_at);
    }

    // == Eviction Hook ==
    /// Forgets a key. Called by the store for every removal; idempotent, so
    /// it does not matter whether the lazy check or the sweep fired first.
    pub fn on_evict(&mut self, key: &str) {
        self.keys.remove(key);
    }

    // == Live Keys ==
    /// Returns all keys whose expiry has not yet elapsed, order unspecified.
    pub fn live_keys(&self, now: u64) -> Vec<String> {
        self.keys
            .iter()
            .filter(|(_, expires_at)| **expires_at > now)
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Filtered Keys ==
    /// Returns live keys containing `filter`, case-insensitively.
    ///
    /// A blank filter is equivalent to no filter.
    pub fn filtered_keys(&self, filter: &str, now: u64) -> Vec<String> {
        let filter = filter.trim().to_lowercase();
        if filter.is_empty() {
            return self.live_keys(now);
        }

        self.keys
            .iter()
            .filter(|(key, expires_at)| {
                **expires_at > now && key.to_lowercase().contains(&filter)
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    // == Clear ==
    /// Forgets all keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    // == Length ==
    /// Returns the number of tracked keys, expired ones included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    // == Contains ==
    /// Checks if a key is being tracked, regardless of expiry.
    #[allow(dead_code)]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains_key(key)
    }
}
