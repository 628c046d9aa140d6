/// Business logic services layer
use crate::clients::PokeClient;
use crate::domain::{NewReading, Page, PokemonSummary, WeatherReading};
use crate::errors::{ApiError, ApiResult};
use crate::export::{export_readings, ExportFormat};
use crate::pagination::PaginationWindow;
use crate::repo::WeatherRepo;
use serde_json::Value;

/// Ordered queries and export over the weather reading store.
pub struct WeatherService {
    repo: WeatherRepo,
}

impl WeatherService {
    pub fn new(repo: WeatherRepo) -> Self {
        Self { repo }
    }

    /// List readings newest-first. A caller-supplied limit bounds the
    /// transfer; without one the full collection is returned (export parity).
    pub async fn list(&self, limit: Option<i64>) -> ApiResult<Vec<WeatherReading>> {
        // non-positive limits are coerced to "no limit" rather than rejected
        let limit = limit.filter(|n| *n > 0);
        self.repo.list(limit).await
    }

    /// Point lookup by id
    pub async fn get(&self, id: i64) -> ApiResult<WeatherReading> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| ApiError::not_found("weather reading"))
    }

    /// Store a reading pushed by the ingestion worker
    pub async fn create(&self, reading: &NewReading) -> ApiResult<WeatherReading> {
        self.repo.insert(reading).await
    }

    /// Serialize the full ordered collection in the requested format
    pub async fn export(&self, format: ExportFormat) -> ApiResult<Vec<u8>> {
        let readings = self.repo.list(None).await?;
        export_readings(&readings, format)
    }
}

/// Paginated proxy over the upstream Pokemon catalog.
pub struct PokemonService {
    client: PokeClient,
}

impl PokemonService {
    pub fn new(client: PokeClient) -> Self {
        Self { client }
    }

    /// One window of the catalog with navigation flags
    pub async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> ApiResult<Page<PokemonSummary>> {
        let window = PaginationWindow::new(limit, offset);
        let (items, total) = self.client.fetch_page(window.limit, window.offset).await?;
        Ok(window.page(items, total))
    }

    /// Point lookup, passed through as upstream JSON
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        self.client.fetch_by_id(id).await
    }
}
