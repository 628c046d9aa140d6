/// Application configuration module
use std::env;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub pokeapi_url: String,
    pub bind_addr: String,
    /// Bearer token required on /api routes; auth is disabled when unset.
    pub api_token: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL is required")?;

        let pokeapi_url = env::var("POKEAPI_URL")
            .unwrap_or_else(|_| "https://pokeapi.co/api/v2/pokemon".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let api_token = env::var("API_TOKEN").ok().filter(|t| !t.is_empty());

        Ok(Self {
            database_url,
            pokeapi_url,
            bind_addr,
            api_token,
        })
    }
}
