use tracing::info;

use crate::{
    dao::storage::StorageError,
    dto::{
        game::{CreateGameRequest, GameSummary},
        play::GameResults,
    },
    error::ServiceError,
    state::{SharedState, game::Game},
};

/// Validate a game definition and persist it under a key not yet in use.
pub async fn create_game(
    state: &SharedState,
    request: CreateGameRequest,
) -> Result<GameSummary, ServiceError> {
    let game = Game::try_from(request)?;
    let store = state.game_store();

    match store.load_game(game.key()).await {
        Ok(existing) => {
            return Err(ServiceError::Conflict(format!(
                "game `{}` already exists",
                existing.key()
            )));
        }
        Err(StorageError::GameNotFound { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    let summary = GameSummary::from(&game);
    store.save_game(game).await?;
    info!(game = %summary.key, items = summary.items.len(), "game created");
    Ok(summary)
}

/// Fetch the summary shown on a game's landing page.
pub async fn game_summary(state: &SharedState, key: &str) -> Result<GameSummary, ServiceError> {
    let game = state.game_store().load_game(key).await?;
    Ok(GameSummary::from(&game))
}

/// Stylesheet attached to a game, if any.
pub async fn stylesheet(state: &SharedState, key: &str) -> Result<String, ServiceError> {
    let game = state.game_store().load_game(key).await?;
    game.css()
        .map(str::to_string)
        .ok_or_else(|| ServiceError::NotFound(format!("game `{key}` has no stylesheet")))
}

/// Points and voters per item, best first.
pub async fn results(state: &SharedState, key: &str) -> Result<GameResults, ServiceError> {
    let game = state.game_store().load_game(key).await?;
    Ok(GameResults::from(&game))
}
