/// Server entry point
use gdash::clients::PokeClient;
use gdash::config::AppConfig;
use gdash::handlers::AppState;
use gdash::repo::{init_db, WeatherRepo};
use gdash::routes::build_router;
use gdash::services::{PokemonService, WeatherService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established");

    // Initialize database schema
    init_db(&pool).await?;
    info!("Database schema initialized");

    // Initialize services
    let weather_repo = WeatherRepo::new(pool.clone());
    let poke_client = PokeClient::new(config.pokeapi_url.clone())?;

    let weather_service = Arc::new(WeatherService::new(weather_repo));
    let pokemon_service = Arc::new(PokemonService::new(poke_client));

    if config.api_token.is_some() {
        info!("Bearer token authentication enabled for /api routes");
    } else {
        info!("No API_TOKEN configured; /api routes are unauthenticated");
    }

    // Initialize application state
    let state = AppState {
        weather_service,
        pokemon_service,
        api_token: config.api_token.clone(),
    };

    // Build router
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("gdash service listening on {}", config.bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
