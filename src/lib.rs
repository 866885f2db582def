//! Library crate for voting-back, exposing modules for binaries and integration tests.

/// Application configuration.
pub mod config;
/// Game persistence.
pub mod dao;
/// Request and response payloads.
pub mod dto;
/// Service and HTTP errors.
pub mod error;
/// HTTP routes.
pub mod routes;
/// Sample game data.
pub mod seed;
/// Business operations behind the routes.
pub mod services;
/// Domain model and shared application state.
pub mod state;
