/// Terminal dashboard client.
///
/// Owns the refresh coordinator: polls the server every 60 seconds, accepts
/// manual refreshes from stdin (press Enter) subject to the cooldown, and
/// renders the latest reading plus the recent history.
use std::env;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use gdash::clients::GdashClient;
use gdash::domain::WeatherReading;
use gdash::errors::ApiResult;
use gdash::refresh::{
    FileStateStore, ReadingsSource, RefreshCoordinator, RefreshEvent, SystemClock,
};

/// How many history entries the terminal view renders.
const HISTORY_LIMIT: usize = 12;

struct ServerSource {
    client: GdashClient,
}

#[async_trait]
impl ReadingsSource for ServerSource {
    async fn fetch(&self) -> ApiResult<Vec<WeatherReading>> {
        self.client.fetch_readings().await
    }
}

fn render(readings: &[WeatherReading]) {
    let Some(latest) = readings.first() else {
        println!("waiting for data...");
        return;
    };

    println!(
        "now: {:.0}C  humidity {}%  wind {} km/h  rain {}%",
        latest.temperature, latest.humidity, latest.wind_speed, latest.rain_probability
    );
    println!("insight: {}", latest.insight);
    println!("recent ({} of {} records):", readings.len().min(HISTORY_LIMIT), readings.len());
    for reading in readings.iter().take(HISTORY_LIMIT) {
        println!(
            "  {}  {:.1}C  {}%  {} km/h",
            reading.created_at.format("%H:%M:%S"),
            reading.temperature,
            reading.humidity,
            reading.wind_speed
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    dotenvy::dotenv().ok();
    let base_url = env::var("GDASH_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let api_token = env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

    let source = ServerSource {
        client: GdashClient::new(base_url.clone(), api_token)?,
    };

    let cancel = CancellationToken::new();
    let mut coordinator = RefreshCoordinator::new(
        Box::new(source),
        FileStateStore::default_location(),
        SystemClock::new(),
        cancel.clone(),
    );

    // Manual refresh requests: one message per line of stdin.
    let (manual_tx, manual_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            if manual_tx.send(()).await.is_err() {
                return;
            }
        }
    });

    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    info!("dashboard polling {} (press Enter for a manual refresh)", base_url);

    coordinator
        .run(manual_rx, |event| match event {
            RefreshEvent::Refreshed(readings) => render(readings),
            RefreshEvent::CoolingDown { notice } => println!("{notice}"),
        })
        .await;

    info!("dashboard shutting down");
    Ok(())
}
