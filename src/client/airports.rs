//! Airport Client
//!
//! Read-through client for airport lists: the full list under the `Airports`
//! root key and per-code lists under `Airports.R.<code>`. Mutations
//! invalidate the whole namespace.

use std::sync::Arc;

use serde_json::json;

use crate::cache::{Cache, CacheNamespace};
use crate::client::fetch::Fetch;
use crate::client::ALL_ROWS_PAGE_SIZE;
use crate::error::{CacheError, Result};
use crate::models::Airport;

/// Key namespace for cached airport lists.
pub const AIRPORTS_NAMESPACE: CacheNamespace = CacheNamespace::new("Airports");

// == Airport Client ==
pub struct AirportClient {
    fetcher: Arc<dyn Fetch>,
    cache: Cache<Vec<Airport>>,
    ttl_seconds: u64,
}

impl AirportClient {
    // == Constructor ==
    pub fn new(fetcher: Arc<dyn Fetch>, cache: Cache<Vec<Airport>>, ttl_seconds: u64) -> Self {
        Self {
            fetcher,
            cache,
            ttl_seconds,
        }
    }

    /// The cache this client populates, for registry registration.
    pub fn cache(&self) -> &Cache<Vec<Airport>> {
        &self.cache
    }

    // == Full List ==
    /// Returns all airports, sorted by code, cached under the root key.
    pub async fn airports(&self) -> Result<Option<Vec<Airport>>> {
        let key = AIRPORTS_NAMESPACE.root();
        let fetcher = self.fetcher.clone();

        self.cache
            .get_or_fetch(&key, self.ttl_seconds, async move {
                let route = format!("airports/1/{}", ALL_ROWS_PAGE_SIZE);
                match fetcher.get(&route).await? {
                    Some(body) => {
                        let mut airports: Vec<Airport> = serde_json::from_str(&body)?;
                        airports.sort_by(|a, b| a.code.cmp(&b.code));
                        Ok(Some(airports))
                    }
                    None => Ok(None),
                }
            })
            .await
    }

    // == List By Code ==
    /// Returns the airports matching an IATA code.
    pub async fn airports_by_code(&self, code: &str) -> Result<Option<Vec<Airport>>> {
        let key = AIRPORTS_NAMESPACE.scoped(format_args!("R.{}", code));
        let fetcher = self.fetcher.clone();
        let route = format!("airports/code/{}/1/{}", code, ALL_ROWS_PAGE_SIZE);

        self.cache
            .get_or_fetch(&key, self.ttl_seconds, async move {
                match fetcher.get(&route).await? {
                    Some(body) => {
                        let mut airports: Vec<Airport> = serde_json::from_str(&body)?;
                        airports.sort_by(|a, b| a.code.cmp(&b.code));
                        Ok(Some(airports))
                    }
                    None => Ok(None),
                }
            })
            .await
    }

    // == Point Lookup By Id ==
    /// Returns the airport with the given id, preferring the cached lists.
    pub async fn airport_by_id(&self, id: i32) -> Result<Option<Airport>> {
        if let Some(airport) = self.find_cached(|a| a.id == id).await {
            return Ok(Some(airport));
        }

        let route = format!("airports/{}/", id);
        match self.fetcher.get(&route).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    // == Create ==
    /// Adds an airport and invalidates every cached airport list.
    pub async fn add_airport(&self, code: &str, name: &str, country_id: i32) -> Result<Airport> {
        self.cache.invalidate_namespace(&AIRPORTS_NAMESPACE).await;

        let body = json!({
            "code": code,
            "name": name,
            "countryId": country_id,
        })
        .to_string();

        let response = self.fetcher.post("airports", body).await?;
        parse_required(response)
    }

    // == Update ==
    /// Updates an airport and invalidates every cached airport list.
    pub async fn update_airport(
        &self,
        id: i32,
        code: &str,
        name: &str,
        country_id: i32,
    ) -> Result<Airport> {
        self.cache.invalidate_namespace(&AIRPORTS_NAMESPACE).await;

        let body = json!({
            "id": id,
            "code": code,
            "name": name,
            "countryId": country_id,
        })
        .to_string();

        let response = self.fetcher.put("airports", body).await?;
        parse_required(response)
    }

    // == Cached-List Scan ==
    async fn find_cached<P>(&self, predicate: P) -> Option<Airport>
    where
        P: Fn(&Airport) -> bool,
    {
        let keys = self.cache.keys().await;
        for key in keys.iter().filter(|k| AIRPORTS_NAMESPACE.owns(k)) {
            if let Some(airports) = self.cache.get(key).await {
                if let Some(found) = airports.iter().find(|a| predicate(a)) {
                    return Some(found.clone());
                }
            }
        }
        None
    }
}

fn parse_required(response: Option<String>) -> Result<Airport> {
    let body = response.ok_or_else(|| CacheError::EmptyUpstream("airports".to_string()))?;
    Ok(serde_json::from_str(&body)?)
}
