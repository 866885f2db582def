use axum::{
    Json, Router,
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::{
        game::{CreateGameRequest, GameSummary},
        play::GameResults,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
};

/// Routes exposing game definitions and their outcome.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games", post(create_game))
        .route("/games/{key}", get(get_game))
        .route("/games/{key}/results", get(get_results))
        .route("/games/{key}/style.css", get(get_stylesheet))
}

/// Create a game from its definition.
#[utoipa::path(
    post,
    path = "/games",
    tag = "game",
    request_body = CreateGameRequest,
    responses(
        (status = 200, description = "Game created", body = GameSummary),
        (status = 400, description = "Invalid game definition"),
        (status = 409, description = "A game already uses this key")
    )
)]
pub async fn create_game(
    State(state): State<SharedState>,
    Json(payload): Json<CreateGameRequest>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::create_game(&state, payload).await?;
    Ok(Json(summary))
}

/// Game landing page: items and joined players.
#[utoipa::path(
    get,
    path = "/games/{key}",
    tag = "game",
    params(("key" = String, Path, description = "Key of the game")),
    responses(
        (status = 200, description = "Game found", body = GameSummary),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_game(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<GameSummary>, AppError> {
    let summary = game_service::game_summary(&state, &key).await?;
    Ok(Json(summary))
}

/// Points and voters per item, best first.
#[utoipa::path(
    get,
    path = "/games/{key}/results",
    tag = "game",
    params(("key" = String, Path, description = "Key of the game")),
    responses(
        (status = 200, description = "Current results", body = GameResults),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn get_results(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<GameResults>, AppError> {
    let results = game_service::results(&state, &key).await?;
    Ok(Json(results))
}

/// Stylesheet attached to the game, served verbatim.
#[utoipa::path(
    get,
    path = "/games/{key}/style.css",
    tag = "game",
    params(("key" = String, Path, description = "Key of the game")),
    responses(
        (status = 200, description = "Game stylesheet", content_type = "text/css", body = String),
        (status = 404, description = "Unknown game or no stylesheet")
    )
)]
pub async fn get_stylesheet(
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let css = game_service::stylesheet(&state, &key).await?;
    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css))
}
