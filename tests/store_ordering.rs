//! Postgres-backed repository tests.
//!
//! These need a reachable database and are gated behind `--ignored`:
//! `DATABASE_URL=postgres://... cargo test -- --ignored`

use gdash::domain::NewReading;
use gdash::repo::{init_db, WeatherRepo};
use sqlx::postgres::PgPoolOptions;

fn reading(temperature: f64) -> NewReading {
    NewReading {
        temperature,
        humidity: 50,
        wind_speed: 4.2,
        rain_probability: 15,
        insight: "ordering check".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn list_returns_readings_newest_first() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("database must be reachable");
    init_db(&pool).await.unwrap();

    let repo = WeatherRepo::new(pool);

    // insert T1, then T2, then T3
    let mut inserted = Vec::new();
    for temperature in [1.0, 2.0, 3.0] {
        inserted.push(repo.insert(&reading(temperature)).await.unwrap().id);
    }

    // the listing must come back [T3, T2, T1]: later inserts first
    let listed = repo.list(None).await.unwrap();
    let position = |id: i64| listed.iter().position(|r| r.id == id).unwrap();
    assert!(position(inserted[2]) < position(inserted[1]));
    assert!(position(inserted[1]) < position(inserted[0]));

    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    // an explicit limit keeps the same order and bounds the transfer
    let bounded = repo.list(Some(1)).await.unwrap();
    assert_eq!(bounded.len(), 1);
    assert_eq!(bounded[0].id, *inserted.last().unwrap());
}

#[tokio::test]
#[ignore]
async fn point_lookup_misses_are_distinct_from_hits() {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("database must be reachable");
    init_db(&pool).await.unwrap();

    let repo = WeatherRepo::new(pool);
    let stored = repo.insert(&reading(21.5)).await.unwrap();

    assert!(repo.get(stored.id).await.unwrap().is_some());
    assert!(repo.get(i64::MAX).await.unwrap().is_none());
}
