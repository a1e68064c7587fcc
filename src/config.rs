//! Configuration Module
//!
//! Handles loading and managing configuration from environment variables.

use std::env;

/// Configuration parameters for the cache layer and its admin surface.
///
/// All values can be configured via environment variables with sensible
/// defaults. The TTL is a per-population default; each client receives its
/// value at construction, not the store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Default cache entry lifetime in seconds
    pub cache_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Admin HTTP server port
    pub server_port: u16,
    /// Base URL of the backend REST API
    pub api_url: String,
    /// Optional bearer token for the backend API
    pub api_token: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Entry lifetime in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 60)
    /// - `SERVER_PORT` - Admin HTTP server port (default: 3000)
    /// - `API_URL` - Backend API base URL (default: http://localhost:8080)
    /// - `API_TOKEN` - Optional bearer token (default: unset)
    pub fn from_env() -> Self {
        Self {
            cache_ttl: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_url: env::var("API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string()),
            api_token: env::var("API_TOKEN").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 300,
            sweep_interval: 60,
            server_port: 3000,
            api_url: "http://localhost:8080".to_string(),
            api_token: None,
        }
    }
}
