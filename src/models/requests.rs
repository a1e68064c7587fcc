//! Request DTOs for the cache administration API
//!
//! Defines the structure of incoming query parameters.

use serde::Deserialize;

/// Query parameters for the key-listing operation (GET /cache/keys)
///
/// A missing or blank filter lists every live key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListKeysParams {
    /// Case-insensitive substring filter
    #[serde(default)]
    pub filter: Option<String>,
}
