/// OpenAPI documentation generation.
pub mod documentation;
/// Game definitions, summaries, stylesheets and results.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Joining games and voting on items.
pub mod play_service;
