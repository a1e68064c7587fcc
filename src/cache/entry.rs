//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

// == Cache Entry ==
/// A single cached value with its expiry metadata.
///
/// The payload type is generic so each cache population is checked at compile
/// time instead of being cast out of an untyped store.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    ///
    /// A TTL of zero produces an entry that is already expired, so it is
    /// immediately evictable and never observable through `get`.
    pub fn new(value: V, ttl_seconds: u64) -> Self {
        let now = current_timestamp_ms();

        Self {
            value,
            created_at: now,
            expires_at: now + ttl_seconds * 1000,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to the expiration time, so a read at exactly
    /// `created_at + ttl` must not observe the value.
    pub fn is_expired(&self) -> bool {
        current_timestamp_ms() >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds (0 once expired).
    pub fn ttl_remaining_ms(&self) -> u64 {
        let now = current_timestamp_ms();
        self.expires_at.saturating_sub(now)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
