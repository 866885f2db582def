use axum::Router;

use crate::state::SharedState;

/// OpenAPI document and Swagger UI.
pub mod docs;
/// Game definitions, stylesheets and results.
pub mod game;
/// Health check.
pub mod health;
/// Join and vote flow.
pub mod play;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    health::router()
        .merge(game::router())
        .merge(play::router())
        .merge(docs::router())
        .with_state(state)
}
