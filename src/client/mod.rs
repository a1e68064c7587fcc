//! Client Module
//!
//! Entity-specific read-through clients and the upstream fetch seam.
//!
//! Every client follows the same contract:
//! 1. Keys are derived only through the entity's [`CacheNamespace`], so
//!    prefix-scoped invalidation can never miss a misspelled key.
//! 2. Reads go through [`Cache::get_or_fetch`]: hit returns, miss fetches,
//!    and only a successful non-empty response is cached with the client's
//!    configured TTL. Failures and empty responses are never cached.
//! 3. Every create/update removes the cached keys it could have staled,
//!    either targeted (`AircraftClient` per-model lists) or the entire
//!    namespace (`FlightClient`, `AirportClient`).
//! 4. Point lookups are answered by scanning the cached lists and are not
//!    cached under their own keys, keeping invalidation transitive.
//!
//! [`Cache::get_or_fetch`]: crate::cache::Cache::get_or_fetch
//! [`CacheNamespace`]: crate::cache::CacheNamespace

mod aircraft;
mod airports;
mod fetch;
mod flights;

pub use aircraft::{AircraftClient, AIRCRAFT_NAMESPACE};
pub use airports::{AirportClient, AIRPORTS_NAMESPACE};
pub use fetch::{Fetch, HttpFetcher};
pub use flights::{FlightClient, FLIGHTS_NAMESPACE};

// == Public Constants ==
/// Page size that effectively disables service-side paging for list fetches
pub const ALL_ROWS_PAGE_SIZE: u32 = 1_000_000;

// == Test Support ==
#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory `Fetch` double for client tests.

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::error::{CacheError, Result};

    use super::Fetch;

    #[derive(Debug, Clone)]
    enum Canned {
        Body(String),
        Empty,
        Status(u16),
    }

    #[derive(Debug, Default)]
    struct Inner {
        get: HashMap<String, Canned>,
        post: HashMap<String, Canned>,
        put: HashMap<String, Canned>,
        get_count: usize,
    }

    /// Scriptable fetch double: canned responses per route, plus a GET
    /// counter for asserting that hits skip the network.
    #[derive(Debug, Clone, Default)]
    pub struct MockFetch {
        inner: Arc<Mutex<Inner>>,
    }

    impl MockFetch {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on_get(&self, route: &str, body: &str) {
            self.inner
                .lock()
                .unwrap()
                .get
                .insert(route.to_string(), Canned::Body(body.to_string()));
        }

        pub fn on_get_empty(&self, route: &str) {
            self.inner
                .lock()
                .unwrap()
                .get
                .insert(route.to_string(), Canned::Empty);
        }

        pub fn on_get_error(&self, route: &str, status: u16) {
            self.inner
                .lock()
                .unwrap()
                .get
                .insert(route.to_string(), Canned::Status(status));
        }

        pub fn on_post(&self, route: &str, body: &str) {
            self.inner
                .lock()
                .unwrap()
                .post
                .insert(route.to_string(), Canned::Body(body.to_string()));
        }

        pub fn on_post_empty(&self, route: &str) {
            self.inner
                .lock()
                .unwrap()
                .post
                .insert(route.to_string(), Canned::Empty);
        }

        pub fn on_put(&self, route: &str, body: &str) {
            self.inner
                .lock()
                .unwrap()
                .put
                .insert(route.to_string(), Canned::Body(body.to_string()));
        }

        pub fn on_put_empty(&self, route: &str) {
            self.inner
                .lock()
                .unwrap()
                .put
                .insert(route.to_string(), Canned::Empty);
        }

        pub fn get_count(&self) -> usize {
            self.inner.lock().unwrap().get_count
        }

        fn respond(canned: Option<Canned>, route: &str) -> Result<Option<String>> {
            match canned {
                Some(Canned::Body(body)) => Ok(Some(body)),
                Some(Canned::Empty) => Ok(None),
                Some(Canned::Status(status)) => {
                    Err(CacheError::UpstreamStatus(status, route.to_string()))
                }
                None => Err(CacheError::Internal(format!("unexpected route: {}", route))),
            }
        }
    }

    #[async_trait]
    impl Fetch for MockFetch {
        async fn get(&self, route: &str) -> Result<Option<String>> {
            let canned = {
                let mut inner = self.inner.lock().unwrap();
                inner.get_count += 1;
                inner.get.get(route).cloned()
            };
            Self::respond(canned, route)
        }

        async fn post(&self, route: &str, _body: String) -> Result<Option<String>> {
            let canned = self.inner.lock().unwrap().post.get(route).cloned();
            Self::respond(canned, route)
        }

        async fn put(&self, route: &str, _body: String) -> Result<Option<String>> {
            let canned = self.inner.lock().unwrap().put.get(route).cloned();
            Self::respond(canned, route)
        }
    }
}
