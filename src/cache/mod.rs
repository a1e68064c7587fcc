//! Cache Module
//!
//! In-process read-through cache: typed TTL store, live-key index, namespace
//! key-builders, and the shared handle/registry plumbing.

mod entry;
mod handle;
mod index;
mod namespace;
mod registry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::{Cache, CacheAdmin};
pub use index::LiveKeyIndex;
pub use namespace::CacheNamespace;
pub use registry::CacheRegistry;
pub use stats::CacheStats;
pub use store::CacheStore;
