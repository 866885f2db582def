//! Player flow: join a game, walk through its items and vote.
//!
//! The player's identity travels in the `player_name` cookie set on join.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
    dto::play::{ItemView, JoinFormResponse, JoinRequest, VoteRejectedResponse, VoteRequest},
    error::{AppError, ServiceError},
    services::play_service::{self, JoinOutcome, NextStep, VoteOutcome},
    state::SharedState,
};

/// Cookie carrying the name the player joined with.
pub const PLAYER_COOKIE: &str = "player_name";

/// Everything but RFC 3986 unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Routes driving a player through a game.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/games/{key}/join", post(join_game))
        .route("/games/{key}/item", get(forward_to_unvoted))
        .route("/games/{key}/item/{item}", get(get_item).post(vote_item))
}

/// Join a game and remember the player in a cookie.
#[utoipa::path(
    post,
    path = "/games/{key}/join",
    tag = "play",
    params(("key" = String, Path, description = "Key of the game")),
    request_body = JoinRequest,
    responses(
        (status = 303, description = "Joined; continue with the first unvoted item"),
        (status = 400, description = "Name already taken; resubmit with `force`", body = JoinFormResponse),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn join_game(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    jar: CookieJar,
    Json(payload): Json<JoinRequest>,
) -> Result<Response, AppError> {
    match play_service::join_game(&state, &key, payload).await? {
        JoinOutcome::Joined { player_name } => {
            let location = format!("{}/item", game_path(&key));
            Ok((jar.add(player_cookie(player_name)), Redirect::to(&location)).into_response())
        }
        JoinOutcome::NameTaken(form) => Ok((StatusCode::BAD_REQUEST, Json(form)).into_response()),
    }
}

/// Send the player to their first unvoted item, or to the results when done.
#[utoipa::path(
    get,
    path = "/games/{key}/item",
    tag = "play",
    params(("key" = String, Path, description = "Key of the game")),
    responses(
        (status = 303, description = "Next unvoted item, results, or the game page for unknown players"),
        (status = 404, description = "Unknown game")
    )
)]
pub async fn forward_to_unvoted(
    State(state): State<SharedState>,
    Path(key): Path<String>,
    jar: CookieJar,
) -> Result<Redirect, AppError> {
    let player = player_from_jar(&jar);
    let step = play_service::next_step(&state, &key, player.as_deref()).await?;
    Ok(redirect_to(&key, step))
}

/// Show one vote item with its neighbours and the player's current choice.
#[utoipa::path(
    get,
    path = "/games/{key}/item/{item}",
    tag = "play",
    params(
        ("key" = String, Path, description = "Key of the game"),
        ("item" = String, Path, description = "Key of the vote item")
    ),
    responses(
        (status = 200, description = "Vote item", body = ItemView),
        (status = 303, description = "Unknown player, back to the game page"),
        (status = 404, description = "Unknown game or item")
    )
)]
pub async fn get_item(
    State(state): State<SharedState>,
    Path((key, item)): Path<(String, String)>,
    jar: CookieJar,
) -> Result<Response, AppError> {
    let player = player_from_jar(&jar);
    match play_service::item_view(&state, &key, &item, player.as_deref()).await {
        Ok(view) => Ok(Json(view).into_response()),
        Err(ServiceError::Unauthorized(_)) => Ok(redirect_to(&key, NextStep::Join).into_response()),
        Err(err) => Err(err.into()),
    }
}

/// Record the player's vote for an item.
#[utoipa::path(
    post,
    path = "/games/{key}/item/{item}",
    tag = "play",
    params(
        ("key" = String, Path, description = "Key of the game"),
        ("item" = String, Path, description = "Key of the vote item")
    ),
    request_body = VoteRequest,
    responses(
        (status = 303, description = "Vote recorded; next unvoted item or results"),
        (status = 400, description = "Missing or unknown choice", body = VoteRejectedResponse),
        (status = 404, description = "Unknown game or item")
    )
)]
pub async fn vote_item(
    State(state): State<SharedState>,
    Path((key, item)): Path<(String, String)>,
    jar: CookieJar,
    Json(payload): Json<VoteRequest>,
) -> Result<Response, AppError> {
    let player = player_from_jar(&jar);
    match play_service::vote(&state, &key, &item, player.as_deref(), payload).await {
        Ok(VoteOutcome::Recorded(step)) => Ok(redirect_to(&key, step).into_response()),
        Ok(VoteOutcome::Rejected(rejected)) => {
            Ok((StatusCode::BAD_REQUEST, Json(rejected)).into_response())
        }
        Err(ServiceError::Unauthorized(_)) => Ok(redirect_to(&key, NextStep::Join).into_response()),
        Err(err) => Err(err.into()),
    }
}

fn redirect_to(key: &str, step: NextStep) -> Redirect {
    let location = match step {
        NextStep::Join => game_path(key),
        NextStep::Item(item) => format!("{}/item/{}", game_path(key), encode_segment(&item)),
        NextStep::Results => format!("{}/results", game_path(key)),
    };
    Redirect::to(&location)
}

fn game_path(key: &str) -> String {
    format!("/games/{}", encode_segment(key))
}

/// Percent-encode a path segment; keys may hold non-ASCII letters.
fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn player_cookie(player_name: String) -> Cookie<'static> {
    Cookie::build((PLAYER_COOKIE, player_name))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// Name stored in the player cookie; surrounding quotes are tolerated.
fn player_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(PLAYER_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header};

    use super::*;

    fn jar_with(cookie: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn cookie_round_trips_names_with_spaces_and_accents() {
        let cookie = player_cookie("Zoë Martin".into());
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));

        let pair = cookie.encoded().stripped().to_string();
        let jar = jar_with(&format!("theme=dark; {pair}"));
        assert_eq!(player_from_jar(&jar).as_deref(), Some("Zoë Martin"));
    }

    #[test]
    fn quoted_cookie_value_is_unwrapped() {
        let jar = jar_with("player_name=\"My Name\"");
        assert_eq!(player_from_jar(&jar).as_deref(), Some("My Name"));
    }

    #[test]
    fn missing_or_empty_cookie_yields_no_player() {
        assert_eq!(player_from_jar(&CookieJar::new()), None);
        assert_eq!(player_from_jar(&jar_with("player_name=\"\"")), None);
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(encode_segment("united-kingdom"), "united-kingdom");
        assert_eq!(encode_segment("österreich"), "%C3%B6sterreich");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }
}
