/// External API clients module
use crate::domain::{PokemonSummary, WeatherReading};
use crate::errors::{ApiError, ApiResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("gdash-service/1.0")
            .build()
            .map_err(|e| ApiError::upstream("http client", e))?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Wire shape of the upstream catalog listing.
#[derive(Debug, Deserialize)]
struct CatalogListResponse {
    count: u64,
    results: Vec<PokemonSummary>,
}

/// Pokemon catalog client (PokeAPI proxy upstream)
pub struct PokeClient {
    http_client: HttpClient,
    base_url: String,
}

impl PokeClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Fetch one window of the catalog, returning the slice and the total count
    pub async fn fetch_page(&self, limit: i64, offset: i64) -> ApiResult<(Vec<PokemonSummary>, u64)> {
        let resp = self
            .http_client
            .get_client()
            .get(&self.base_url)
            .query(&[("limit", limit), ("offset", offset)])
            .send()
            .await
            .map_err(|e| ApiError::upstream("pokemon list", e))?;

        if !resp.status().is_success() {
            return Err(ApiError::upstream("pokemon list", resp.status()));
        }

        let body: CatalogListResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::upstream("pokemon list", e))?;

        Ok((body.results, body.count))
    }

    /// Point lookup; upstream 404 is NotFound, anything else is Upstream
    pub async fn fetch_by_id(&self, id: &str) -> ApiResult<Value> {
        let url = format!("{}/{}", self.base_url, id);
        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::upstream("pokemon", e))?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::not_found("pokemon"));
        }
        if !resp.status().is_success() {
            return Err(ApiError::upstream("pokemon", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| ApiError::upstream("pokemon", e))
    }
}

/// Client for the gdash server itself, used by the dashboard binary
pub struct GdashClient {
    http_client: HttpClient,
    base_url: String,
    api_token: Option<String>,
}

impl GdashClient {
    pub fn new(base_url: String, api_token: Option<String>) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
            api_token,
        })
    }

    /// Fetch the full reading collection, newest-first
    pub async fn fetch_readings(&self) -> ApiResult<Vec<WeatherReading>> {
        let url = format!("{}/api/weather", self.base_url);
        let mut req = self.http_client.get_client().get(&url);
        if let Some(token) = &self.api_token {
            req = req.bearer_auth(token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::upstream("weather readings", e))?;

        if !resp.status().is_success() {
            return Err(ApiError::upstream("weather readings", resp.status()));
        }

        resp.json()
            .await
            .map_err(|e| ApiError::upstream("weather readings", e))
    }
}
