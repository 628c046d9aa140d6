//! GDASH weather monitoring dashboard.
//!
//! The server half exposes the reading store and the Pokemon catalog proxy
//! over REST; the client half owns the refresh coordination (cooldown,
//! persisted refresh state, recurring poll) and renders the collection.

pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod pagination;
pub mod refresh;
pub mod repo;
pub mod routes;
pub mod services;
