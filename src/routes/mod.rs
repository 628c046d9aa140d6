/// Application routes configuration
use crate::handlers::{
    bearer_auth, create_weather, export_weather, get_pokemon, get_weather, health, list_pokemon,
    list_weather, AppState,
};
use axum::{
    middleware,
    routing::get,
    Router,
};

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        // Weather readings
        .route("/weather", get(list_weather).post(create_weather))
        .route("/weather/:id", get(get_weather))
        .route("/weather/export/:format", get(export_weather))
        // Pokemon catalog proxy
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/:id", get(get_pokemon))
        .route_layer(middleware::from_fn_with_state(state.clone(), bearer_auth));

    Router::new()
        // Health check
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}
