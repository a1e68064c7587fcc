//! Flight Client
//!
//! Read-through client for flight lists cached under route, airline and
//! number discriminators: `Flights.R.<from>.<to>`, `Flights.A.<airlineId>`,
//! `Flights.N.<number>`. A single flight can appear in all three shapes, so
//! any mutation invalidates the whole `Flights` namespace.

use std::sync::Arc;

use serde_json::json;

use crate::cache::{Cache, CacheNamespace};
use crate::client::fetch::Fetch;
use crate::client::ALL_ROWS_PAGE_SIZE;
use crate::error::{CacheError, Result};
use crate::models::Flight;

/// Key namespace for cached flight lists.
pub const FLIGHTS_NAMESPACE: CacheNamespace = CacheNamespace::new("Flights");

// == Flight Client ==
pub struct FlightClient {
    fetcher: Arc<dyn Fetch>,
    cache: Cache<Vec<Flight>>,
    ttl_seconds: u64,
}

impl FlightClient {
    // == Constructor ==
    pub fn new(fetcher: Arc<dyn Fetch>, cache: Cache<Vec<Flight>>, ttl_seconds: u64) -> Self {
        Self {
            fetcher,
            cache,
            ttl_seconds,
        }
    }

    /// The cache this client populates, for registry registration.
    pub fn cache(&self) -> &Cache<Vec<Flight>> {
        &self.cache
    }

    // == List By Route ==
    /// Returns flights between two airports, sorted by embarkation then
    /// destination.
    pub async fn flights_by_route(
        &self,
        embarkation: &str,
        destination: &str,
    ) -> Result<Option<Vec<Flight>>> {
        let key = FLIGHTS_NAMESPACE.scoped(format_args!("R.{}.{}", embarkation, destination));
        let route = format!(
            "flights/route/{}/{}/1/{}",
            embarkation, destination, ALL_ROWS_PAGE_SIZE
        );
        self.fetch_list(&key, route, |flights| {
            flights.sort_by(|a, b| {
                (&a.embarkation, &a.destination).cmp(&(&b.embarkation, &b.destination))
            });
        })
        .await
    }

    // == List By Airline ==
    /// Returns an airline's flights, sorted by airline name then route.
    pub async fn flights_by_airline(&self, airline_id: i32) -> Result<Option<Vec<Flight>>> {
        let key = FLIGHTS_NAMESPACE.scoped(format_args!("A.{}", airline_id));
        let route = format!("flights/airline/{}/1/{}", airline_id, ALL_ROWS_PAGE_SIZE);
        self.fetch_list(&key, route, sort_by_airline_then_route).await
    }

    // == List By Number ==
    /// Returns flights with the given flight number.
    pub async fn flights_by_number(&self, number: &str) -> Result<Option<Vec<Flight>>> {
        let key = FLIGHTS_NAMESPACE.scoped(format_args!("N.{}", number));
        let route = format!("flights/number/{}/1/{}", number, ALL_ROWS_PAGE_SIZE);
        self.fetch_list(&key, route, sort_by_airline_then_route).await
    }

    // == Point Lookup By Id ==
    /// Returns the flight with the given id, preferring the cached lists.
    /// The fallback fetch is never cached standalone.
    pub async fn flight_by_id(&self, id: i32) -> Result<Option<Flight>> {
        if let Some(flight) = self.find_cached(|f| f.id == id).await {
            return Ok(Some(flight));
        }

        let route = format!("flights/{}/", id);
        match self.fetcher.get(&route).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    // == Create ==
    /// Adds a flight. The new flight changes the cached lists by number,
    /// route and airline, so the whole namespace is invalidated.
    pub async fn add_flight(
        &self,
        number: &str,
        embarkation: &str,
        destination: &str,
        airline_id: i32,
    ) -> Result<Flight> {
        self.cache.invalidate_namespace(&FLIGHTS_NAMESPACE).await;

        let body = json!({
            "number": number,
            "embarkation": embarkation,
            "destination": destination,
            "airlineId": airline_id,
        })
        .to_string();

        let response = self.fetcher.post("flights", body).await?;
        parse_required(response)
    }

    // == Update ==
    /// Updates a flight; invalidates the whole namespace for the same reason
    /// as `add_flight`.
    pub async fn update_flight(
        &self,
        id: i32,
        number: &str,
        embarkation: &str,
        destination: &str,
        airline_id: i32,
    ) -> Result<Flight> {
        self.cache.invalidate_namespace(&FLIGHTS_NAMESPACE).await;

        let body = json!({
            "id": id,
            "number": number,
            "embarkation": embarkation,
            "destination": destination,
            "airlineId": airline_id,
        })
        .to_string();

        let response = self.fetcher.put("flights", body).await?;
        parse_required(response)
    }

    async fn fetch_list<S>(&self, key: &str, route: String, sort: S) -> Result<Option<Vec<Flight>>>
    where
        S: FnOnce(&mut Vec<Flight>),
    {
        let fetcher = self.fetcher.clone();
        self.cache
            .get_or_fetch(key, self.ttl_seconds, async move {
                match fetcher.get(&route).await? {
                    Some(body) => {
                        let mut flights: Vec<Flight> = serde_json::from_str(&body)?;
                        sort(&mut flights);
                        Ok(Some(flights))
                    }
                    None => Ok(None),
                }
            })
            .await
    }

    // == Cached-List Scan ==
    async fn find_cached<P>(&self, predicate: P) -> Option<Flight>
    where
        P: Fn(&Flight) -> bool,
    {
        let keys = self.cache.keys().await;
        for key in keys.iter().filter(|k| FLIGHTS_NAMESPACE.owns(k)) {
            if let Some(flights) = self.cache.get(key).await {
                if let Some(found) = flights.iter().find(|f| predicate(f)) {
                    return Some(found.clone());
                }
            }
        }
        None
    }
}

fn sort_by_airline_then_route(flights: &mut Vec<Flight>) {
    flights.sort_by(|a, b| {
        (&a.airline.name, &a.embarkation, &a.destination)
            .cmp(&(&b.airline.name, &b.embarkation, &b.destination))
    });
}

fn parse_required(response: Option<String>) -> Result<Flight> {
    let body = response.ok_or_else(|| CacheError::EmptyUpstream("flights".to_string()))?;
    Ok(serde_json::from_str(&body)?)
}
