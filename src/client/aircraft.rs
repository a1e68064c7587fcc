//! Aircraft Client
//!
//! Read-through client for aircraft lists, cached per model under
//! `Aircraft.<modelId>`. Point lookups (by id, by registration) are resolved
//! by scanning the cached lists and are never cached standalone, so removing
//! the list keys invalidates them transitively.

use std::sync::Arc;

use serde_json::json;

use crate::cache::{Cache, CacheNamespace};
use crate::client::fetch::Fetch;
use crate::client::ALL_ROWS_PAGE_SIZE;
use crate::error::{CacheError, Result};
use crate::models::Aircraft;

/// Key namespace for cached aircraft lists.
pub const AIRCRAFT_NAMESPACE: CacheNamespace = CacheNamespace::new("Aircraft");

// == Aircraft Client ==
pub struct AircraftClient {
    fetcher: Arc<dyn Fetch>,
    cache: Cache<Vec<Aircraft>>,
    ttl_seconds: u64,
}

impl AircraftClient {
    // == Constructor ==
    /// Creates a client over the injected fetcher and cache instance.
    pub fn new(fetcher: Arc<dyn Fetch>, cache: Cache<Vec<Aircraft>>, ttl_seconds: u64) -> Self {
        Self {
            fetcher,
            cache,
            ttl_seconds,
        }
    }

    /// The cache this client populates, for registry registration.
    pub fn cache(&self) -> &Cache<Vec<Aircraft>> {
        &self.cache
    }

    // == List By Model ==
    /// Returns the aircraft of the specified model, sorted by registration.
    pub async fn aircraft_by_model(&self, model_id: i32) -> Result<Option<Vec<Aircraft>>> {
        let key = AIRCRAFT_NAMESPACE.scoped(model_id);
        let fetcher = self.fetcher.clone();

        self.cache
            .get_or_fetch(&key, self.ttl_seconds, async move {
                let route = format!("aircraft/model/{}/1/{}", model_id, ALL_ROWS_PAGE_SIZE);
                match fetcher.get(&route).await? {
                    Some(body) => {
                        let mut aircraft: Vec<Aircraft> = serde_json::from_str(&body)?;
                        aircraft.sort_by(|a, b| a.registration.cmp(&b.registration));
                        for aeroplane in &mut aircraft {
                            normalize(aeroplane);
                        }
                        Ok(Some(aircraft))
                    }
                    None => Ok(None),
                }
            })
            .await
    }

    // == Point Lookup By Registration ==
    /// Returns the aircraft with the given registration, preferring the
    /// cached lists over a network round trip. The fallback fetch is not
    /// cached: it is keyed off data already covered by the list keys.
    pub async fn aircraft_by_registration(&self, registration: &str) -> Result<Option<Aircraft>> {
        if let Some(aircraft) = self.find_cached(|a| a.registration == registration).await {
            return Ok(Some(aircraft));
        }

        let route = format!("aircraft/registration/{}/", registration);
        self.fetch_one(&route).await
    }

    // == Point Lookup By Id ==
    /// Returns the aircraft with the given id, preferring the cached lists.
    pub async fn aircraft_by_id(&self, id: i32) -> Result<Option<Aircraft>> {
        if let Some(aircraft) = self.find_cached(|a| a.id == id).await {
            return Ok(Some(aircraft));
        }

        let route = format!("aircraft/{}/", id);
        self.fetch_one(&route).await
    }

    // == Create ==
    /// Creates an aircraft. The affected model's cached list is removed
    /// before the write so a concurrent read cannot serve the stale list
    /// after the mutation completes.
    pub async fn add_aircraft(
        &self,
        registration: &str,
        serial_number: Option<&str>,
        year_of_manufacture: Option<u32>,
        model_id: i32,
    ) -> Result<Aircraft> {
        self.cache.remove(&AIRCRAFT_NAMESPACE.scoped(model_id)).await;

        let body = json!({
            "registration": registration,
            "serialNumber": serial_number.unwrap_or(""),
            "manufactured": year_of_manufacture.unwrap_or(0),
            "modelId": model_id,
        })
        .to_string();

        let response = self.fetcher.post("aircraft", body).await?;
        parse_required(response, "aircraft")
    }

    // == Update ==
    /// Updates an aircraft. The update may move it between models, so both
    /// the original model's cached list (when known) and the new model's are
    /// removed.
    pub async fn update_aircraft(
        &self,
        id: i32,
        registration: &str,
        serial_number: Option<&str>,
        year_of_manufacture: Option<u32>,
        model_id: i32,
    ) -> Result<Aircraft> {
        if let Some(original) = self.find_cached(|a| a.id == id).await {
            self.cache
                .remove(&AIRCRAFT_NAMESPACE.scoped(original.model_id))
                .await;
        }
        self.cache.remove(&AIRCRAFT_NAMESPACE.scoped(model_id)).await;

        let body = json!({
            "id": id,
            "modelId": model_id,
            "registration": registration,
            "serialNumber": serial_number.unwrap_or(""),
            "manufactured": year_of_manufacture.unwrap_or(0),
        })
        .to_string();

        let response = self.fetcher.put("aircraft", body).await?;
        parse_required(response, "aircraft")
    }

    // == Cached-List Scan ==
    /// Locates an aircraft matching the predicate in the cached lists.
    async fn find_cached<P>(&self, predicate: P) -> Option<Aircraft>
    where
        P: Fn(&Aircraft) -> bool,
    {
        let keys = self.cache.keys().await;
        for key in keys.iter().filter(|k| AIRCRAFT_NAMESPACE.owns(k)) {
            if let Some(aircraft) = self.cache.get(key).await {
                if let Some(found) = aircraft.iter().find(|a| predicate(a)) {
                    return Some(found.clone());
                }
            }
        }
        None
    }

    async fn fetch_one(&self, route: &str) -> Result<Option<Aircraft>> {
        match self.fetcher.get(route).await? {
            Some(body) => {
                let mut aircraft: Aircraft = serde_json::from_str(&body)?;
                normalize(&mut aircraft);
                Ok(Some(aircraft))
            }
            None => Ok(None),
        }
    }
}

/// The service encodes an unknown year of manufacture as 0.
fn normalize(aircraft: &mut Aircraft) {
    if aircraft.manufactured == Some(0) {
        aircraft.manufactured = None;
    }
}

fn parse_required(response: Option<String>, what: &str) -> Result<Aircraft> {
    let body = response
        .ok_or_else(|| CacheError::EmptyUpstream(what.to_string()))?;
    let mut aircraft: Aircraft = serde_json::from_str(&body)?;
    normalize(&mut aircraft);
    Ok(aircraft)
}
