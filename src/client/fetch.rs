//! Upstream Fetch Module
//!
//! The opaque network collaborator behind the read-through clients. The cache
//! layer never inspects payloads beyond success and non-emptiness; parsing
//! belongs to the individual clients.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{CacheError, Result};

// == Fetch Trait ==
/// Narrow seam to the backend REST service.
///
/// All methods return `Ok(None)` for a successful response with an empty
/// body, and an error for transport failures or non-success statuses.
/// Callers must propagate errors rather than caching them.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// GET a route, returning the response body if non-empty.
    async fn get(&self, route: &str) -> Result<Option<String>>;

    /// POST a JSON body to a route.
    async fn post(&self, route: &str, body: String) -> Result<Option<String>>;

    /// PUT a JSON body to a route.
    async fn put(&self, route: &str, body: String) -> Result<Option<String>>;
}

// == HTTP Fetcher ==
/// reqwest-backed `Fetch` implementation for the backend REST API.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpFetcher {
    // == Constructor ==
    /// Creates a fetcher for the given API base URL with an optional bearer
    /// token for the Authorization header.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token,
        }
    }

    fn url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_response(route: &str, response: reqwest::Response) -> Result<Option<String>> {
        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::UpstreamStatus(status.as_u16(), route.to_string()));
        }

        let body = response.text().await?;
        debug!("Upstream {} returned {} bytes", route, body.len());
        if body.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(body))
        }
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, route: &str) -> Result<Option<String>> {
        let response = self.authorized(self.client.get(self.url(route))).send().await?;
        Self::read_response(route, response).await
    }

    async fn post(&self, route: &str, body: String) -> Result<Option<String>> {
        let response = self
            .authorized(self.client.post(self.url(route)))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;
        Self::read_response(route, response).await
    }

    async fn put(&self, route: &str, body: String) -> Result<Option<String>> {
        let response = self
            .authorized(self.client.put(self.url(route)))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;
        Self::read_response(route, response).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/airports/1/1000000")
            .with_status(200)
            .with_body(r#"[{"id":1,"code":"LGW","name":"Gatwick"}]"#)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(server.url(), None);
        let body = fetcher.get("airports/1/1000000").await.unwrap();

        assert!(body.unwrap().contains("LGW"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/airports/code/XXX/1/1000000")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(server.url(), None);
        let body = fetcher.get("airports/code/XXX/1/1000000").await.unwrap();

        assert_eq!(body, None);
    }

    #[tokio::test]
    async fn test_error_status_propagates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/flights/1/1000000")
            .with_status(500)
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(server.url(), None);
        let result = fetcher.get("flights/1/1000000").await;

        assert!(matches!(result, Err(CacheError::UpstreamStatus(500, _))));
    }

    #[tokio::test]
    async fn test_bearer_token_header() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/aircraft")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let fetcher = HttpFetcher::new(server.url(), Some("secret".to_string()));
        fetcher.post("aircraft", "{}".to_string()).await.unwrap();

        mock.assert_async().await;
    }
}
