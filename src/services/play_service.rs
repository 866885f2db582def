use tracing::debug;

use crate::{
    dao::storage::StorageError,
    dto::play::{ItemView, JoinFormResponse, JoinRequest, VoteRejectedResponse, VoteRequest},
    error::ServiceError,
    state::{SharedState, game::Game},
};

/// Where a player should be sent next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextStep {
    /// Back to the game page to join first.
    Join,
    /// The given vote item.
    Item(String),
    /// Every item has a vote: show the results.
    Results,
}

/// Result of a join attempt.
#[derive(Debug)]
pub enum JoinOutcome {
    /// The player is registered under `player_name`.
    Joined {
        /// Name stored in the player cookie.
        player_name: String,
    },
    /// The name is taken; the form is echoed back with `force` set.
    NameTaken(JoinFormResponse),
}

/// Result of a vote submission.
#[derive(Debug)]
pub enum VoteOutcome {
    /// The vote is stored; continue with the given step.
    Recorded(NextStep),
    /// Nothing was stored; the item is shown again with the reason.
    Rejected(VoteRejectedResponse),
}

/// Add a player to a game.
pub async fn join_game(
    state: &SharedState,
    key: &str,
    request: JoinRequest,
) -> Result<JoinOutcome, ServiceError> {
    let JoinRequest { player_name, force } = request;
    let player_name = player_name.trim().to_string();

    match state
        .game_store()
        .join_game(key, &player_name, force)
        .await
    {
        Ok(player) => {
            debug!(game = key, player = player.name(), force, "player joined");
            Ok(JoinOutcome::Joined {
                player_name: player.name().to_string(),
            })
        }
        Err(err @ StorageError::PlayerAlreadyExists { .. }) => {
            debug!(game = key, player = %player_name, "player name already taken");
            Ok(JoinOutcome::NameTaken(JoinFormResponse {
                message: err.to_string(),
                player_name,
                force: true,
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// Resolve the first item `player` has not voted on yet.
pub async fn next_step(
    state: &SharedState,
    key: &str,
    player: Option<&str>,
) -> Result<NextStep, ServiceError> {
    let game = state.game_store().load_game(key).await?;
    let Some(player) = player.filter(|name| game.player(name).is_some()) else {
        return Ok(NextStep::Join);
    };
    Ok(step_after(&game, player))
}

/// Render a vote item for a joined player.
///
/// Fails with [`ServiceError::Unauthorized`] when the player is unknown to the game.
pub async fn item_view(
    state: &SharedState,
    key: &str,
    item_key: &str,
    player: Option<&str>,
) -> Result<ItemView, ServiceError> {
    let game = state.game_store().load_game(key).await?;
    let player = known_player(&game, player)?;
    view_of(&game, item_key, player)
}

/// Record a player's vote and work out where to go next.
///
/// Missing or unknown choices are not errors: the item view is sent back with
/// the reason attached.
pub async fn vote(
    state: &SharedState,
    key: &str,
    item_key: &str,
    player: Option<&str>,
    request: VoteRequest,
) -> Result<VoteOutcome, ServiceError> {
    let store = state.game_store();
    let game = store.load_game(key).await?;
    let player = known_player(&game, player)?;
    let view = view_of(&game, item_key, player)?;

    let Some(choice) = request.vote.filter(|choice| !choice.is_empty()) else {
        return Ok(VoteOutcome::Rejected(VoteRejectedResponse {
            message: "pick a choice before voting".into(),
            view,
        }));
    };

    match store.vote(player, key, item_key, &choice).await {
        Ok(()) => {}
        Err(
            err @ (StorageError::VoteItemNotFound { .. } | StorageError::ChoiceNotFound { .. }),
        ) => {
            debug!(game = key, item = item_key, player, error = %err, "vote rejected");
            return Ok(VoteOutcome::Rejected(VoteRejectedResponse {
                message: err.to_string(),
                view,
            }));
        }
        Err(err) => return Err(err.into()),
    }
    debug!(game = key, item = item_key, player, choice = %choice, "vote recorded");

    let game = store.load_game(key).await?;
    Ok(VoteOutcome::Recorded(step_after(&game, player)))
}

fn known_player<'a>(game: &Game, player: Option<&'a str>) -> Result<&'a str, ServiceError> {
    player
        .filter(|name| game.player(name).is_some())
        .ok_or_else(|| {
            ServiceError::Unauthorized(format!("join game `{}` before voting", game.key()))
        })
}

fn view_of(game: &Game, item_key: &str, player: &str) -> Result<ItemView, ServiceError> {
    let item = game.item(item_key).ok_or_else(|| {
        ServiceError::NotFound(format!(
            "vote item `{item_key}` not found in game `{}`",
            game.name()
        ))
    })?;
    Ok(ItemView::new(game, item, player))
}

fn step_after(game: &Game, player: &str) -> NextStep {
    match game.next_unvoted_item(player) {
        Some(item_key) => NextStep::Item(item_key.to_string()),
        None => NextStep::Results,
    }
}
