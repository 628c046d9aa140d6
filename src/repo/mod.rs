/// Repository layer for database operations
use crate::domain::{NewReading, WeatherReading};
use crate::errors::ApiResult;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

type ReadingRow = (i64, f64, i32, f64, i32, String, DateTime<Utc>);

fn from_row((id, temperature, humidity, wind_speed, rain_probability, insight, created_at): ReadingRow) -> WeatherReading {
    WeatherReading {
        id,
        temperature,
        humidity,
        wind_speed,
        rain_probability,
        insight,
        created_at,
    }
}

/// Weather reading repository
#[derive(Clone)]
pub struct WeatherRepo {
    pool: PgPool,
}

impl WeatherRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new reading, returning the stored row with its identity
    pub async fn insert(&self, reading: &NewReading) -> ApiResult<WeatherReading> {
        let row = sqlx::query_as::<_, ReadingRow>(
            "INSERT INTO weather_readings(temperature, humidity, wind_speed, rain_probability, insight)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, temperature, humidity, wind_speed, rain_probability, insight, created_at",
        )
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(reading.wind_speed)
        .bind(reading.rain_probability)
        .bind(&reading.insight)
        .fetch_one(&self.pool)
        .await?;

        Ok(from_row(row))
    }

    /// List readings newest-first, optionally bounded to the most recent N
    pub async fn list(&self, limit: Option<i64>) -> ApiResult<Vec<WeatherReading>> {
        let rows = match limit {
            Some(n) => {
                sqlx::query_as::<_, ReadingRow>(
                    "SELECT id, temperature, humidity, wind_speed, rain_probability, insight, created_at
                     FROM weather_readings
                     ORDER BY created_at DESC, id DESC
                     LIMIT $1",
                )
                .bind(n)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ReadingRow>(
                    "SELECT id, temperature, humidity, wind_speed, rain_probability, insight, created_at
                     FROM weather_readings
                     ORDER BY created_at DESC, id DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(from_row).collect())
    }

    /// Point lookup by store-assigned id
    pub async fn get(&self, id: i64) -> ApiResult<Option<WeatherReading>> {
        let row = sqlx::query_as::<_, ReadingRow>(
            "SELECT id, temperature, humidity, wind_speed, rain_probability, insight, created_at
             FROM weather_readings
             WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(from_row))
    }
}

/// Initialize database tables
pub async fn init_db(pool: &PgPool) -> ApiResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS weather_readings(
            id BIGSERIAL PRIMARY KEY,
            temperature DOUBLE PRECISION NOT NULL,
            humidity INT NOT NULL,
            wind_speed DOUBLE PRECISION NOT NULL,
            rain_probability INT NOT NULL DEFAULT 0,
            insight TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS ix_weather_readings_created_at
         ON weather_readings(created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
