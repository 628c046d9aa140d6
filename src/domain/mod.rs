/// Domain models for the application
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped weather observation.
///
/// Readings are created by the external ingestion worker and never updated;
/// `created_at` is assigned by the store. The wire format is camelCase to
/// match the dashboard's JSON surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub id: i64,
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub rain_probability: i32,
    pub insight: String,
    pub created_at: DateTime<Utc>,
}

/// Ingestion payload for a new reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub temperature: f64,
    pub humidity: i32,
    pub wind_speed: f64,
    pub rain_probability: i32,
    pub insight: String,
}

/// One page of a larger ordered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Catalog entry as returned by the upstream Pokemon listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reading_serializes_camel_case() {
        let reading = WeatherReading {
            id: 1,
            temperature: 24.5,
            humidity: 61,
            wind_speed: 12.3,
            rain_probability: 40,
            insight: "mild afternoon".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&reading).unwrap();
        assert!(json.get("windSpeed").is_some());
        assert!(json.get("rainProbability").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("wind_speed").is_none());
    }

    #[test]
    fn page_serializes_navigation_flags() {
        let page = Page {
            items: vec!["bulbasaur"],
            total: 45,
            has_next: true,
            has_previous: false,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["hasNext"], true);
        assert_eq!(json["hasPrevious"], false);
        assert_eq!(json["total"], 45);
    }
}
