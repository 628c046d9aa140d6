/// HTTP request handlers
use crate::domain::{Health, NewReading, Page, PokemonSummary, WeatherReading};
use crate::errors::ApiError;
use crate::export::ExportFormat;
use crate::services::{PokemonService, WeatherService};
use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub weather_service: Arc<WeatherService>,
    pub pokemon_service: Arc<PokemonService>,
    pub api_token: Option<String>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Malformed values are coerced, not rejected: an unparseable limit or
/// offset reads as absent and falls back to the default.
fn int_param(params: &HashMap<String, String>, key: &str) -> Option<i64> {
    params.get(key).and_then(|s| s.parse().ok())
}

/// List weather readings, newest-first
pub async fn list_weather(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<WeatherReading>>, ApiError> {
    let readings = state.weather_service.list(int_param(&params, "limit")).await?;
    Ok(Json(readings))
}

/// Point lookup for a single reading
pub async fn get_weather(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<WeatherReading>, ApiError> {
    let reading = state.weather_service.get(id).await?;
    Ok(Json(reading))
}

/// Ingest a reading pushed by the worker
pub async fn create_weather(
    State(state): State<AppState>,
    Json(payload): Json<NewReading>,
) -> Result<(StatusCode, Json<WeatherReading>), ApiError> {
    let stored = state.weather_service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Export all readings as a downloadable csv or xlsx artifact
pub async fn export_weather(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse()?;
    let bytes = state.weather_service.export(format).await?;

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        ),
    ];

    Ok((headers, bytes).into_response())
}

/// One page of the Pokemon catalog
pub async fn list_pokemon(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Page<PokemonSummary>>, ApiError> {
    let page = state
        .pokemon_service
        .list(int_param(&params, "limit"), int_param(&params, "offset"))
        .await?;
    Ok(Json(page))
}

/// Pokemon point lookup, passed through from upstream
pub async fn get_pokemon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let data = state.pokemon_service.get(&id).await?;
    Ok(Json(data))
}

/// Bearer token authentication middleware.
///
/// Disabled when no token is configured. Comparison is constant-time.
pub async fn bearer_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(expected) = &state.api_token else {
        return next.run(request).await;
    };

    let supplied = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let authorized = supplied
        .map(|token| token.as_bytes().ct_eq(expected.as_bytes()).into())
        .unwrap_or(false);

    if !authorized {
        tracing::warn!("rejected request with missing or invalid bearer token");
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "ok": false,
                "error": { "code": "UNAUTHORIZED", "message": "missing or invalid token" }
            })),
        )
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_query_params_read_as_absent() {
        let mut params = HashMap::new();
        params.insert("limit".to_string(), "abc".to_string());
        params.insert("offset".to_string(), "40".to_string());

        assert_eq!(int_param(&params, "limit"), None);
        assert_eq!(int_param(&params, "offset"), Some(40));
        assert_eq!(int_param(&params, "missing"), None);
    }
}
