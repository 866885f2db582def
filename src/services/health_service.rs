use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Probe the game store, reporting degraded when it cannot be reached.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.game_store().health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
