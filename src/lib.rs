//! Flightcache - a read-through TTL cache layer
//!
//! Typed in-process caching for the flight reporting client: TTL store with a
//! live-key index, namespace-scoped invalidation, read-through entity
//! clients, and an HTTP administration surface.

pub mod admin;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use admin::AppState;
pub use cache::{Cache, CacheAdmin, CacheNamespace, CacheRegistry};
pub use config::Config;
pub use tasks::spawn_sweeper_task;
