//! Payloads exchanged while a player walks through the vote items.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::game::VoteItemSummary,
    state::game::{Game, VoteItem},
};

/// Join form submitted from the game page.
#[derive(Debug, Deserialize, ToSchema)]
pub struct JoinRequest {
    /// Name to join with; surrounding whitespace is ignored.
    pub player_name: String,
    /// Join under a name already taken in this game.
    #[serde(default)]
    pub force: bool,
}

/// Join form echoed back when the name is already taken.
///
/// Resubmitting it as-is joins as the existing player.
#[derive(Debug, Serialize, ToSchema)]
pub struct JoinFormResponse {
    /// Why the join was refused.
    pub message: String,
    /// Name that was submitted.
    pub player_name: String,
    /// Always set, so resubmitting joins anyway.
    pub force: bool,
}

/// Vote form for a single item. A missing `vote` is rejected.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VoteRequest {
    /// Key of the picked choice.
    #[serde(default)]
    pub vote: Option<String>,
}

/// Everything needed to render one vote item for a player.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemView {
    /// Key of the game.
    pub game_key: String,
    /// Name of the game.
    pub game_name: String,
    /// Player the view is rendered for.
    pub player_name: String,
    /// The item and its choices.
    pub item: VoteItemSummary,
    /// 1-based position of the item within the game.
    pub position: usize,
    /// Number of items in the game.
    pub total: usize,
    /// Key of the item before this one.
    pub previous: Option<String>,
    /// Key of the item after this one.
    pub next: Option<String>,
    /// Choice key the player already picked for this item.
    pub current_choice: Option<String>,
}

impl ItemView {
    /// Project `item` of `game` as seen by `player_name`.
    pub fn new(game: &Game, item: &VoteItem, player_name: &str) -> Self {
        let position = game
            .items()
            .iter()
            .position(|candidate| candidate.key() == item.key())
            .map_or(0, |index| index + 1);

        Self {
            game_key: game.key().to_string(),
            game_name: game.name().to_string(),
            player_name: player_name.to_string(),
            item: item.into(),
            position,
            total: game.items().len(),
            previous: game.previous_item(item.key()).map(|i| i.key().to_string()),
            next: game.next_item(item.key()).map(|i| i.key().to_string()),
            current_choice: game
                .player(player_name)
                .and_then(|player| player.vote_for(item.key()))
                .map(str::to_string),
        }
    }
}

/// Item view re-rendered with the reason the vote was refused.
#[derive(Debug, Serialize, ToSchema)]
pub struct VoteRejectedResponse {
    /// Why the vote was refused.
    pub message: String,
    /// The item, as it was shown before voting.
    pub view: ItemView,
}

/// Aggregated outcome of a game.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameResults {
    /// Key of the game.
    pub key: String,
    /// Name of the game.
    pub name: String,
    /// Items ordered by points, highest first; ties keep item order.
    pub results: Vec<ItemResult>,
}

/// Score of one vote item.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemResult {
    /// Key of the item.
    pub key: String,
    /// Short icon, if any.
    pub icon: Option<String>,
    /// Display title.
    pub title: String,
    /// Description.
    pub text: String,
    /// Sum of the values of every recorded choice.
    pub points: i64,
    /// Names of the players who voted on the item.
    pub voters: Vec<String>,
}

impl From<&Game> for GameResults {
    fn from(game: &Game) -> Self {
        let points = game.points();
        let mut results = game
            .votes()
            .into_iter()
            .map(|(item, voters)| ItemResult {
                key: item.key().to_string(),
                icon: item.icon().map(str::to_string),
                title: item.title().to_string(),
                text: item.text().to_string(),
                points: points.get(item).copied().unwrap_or_default(),
                voters: voters
                    .into_iter()
                    .map(|player| player.name().to_string())
                    .collect(),
            })
            .collect::<Vec<_>>();
        results.sort_by(|a, b| b.points.cmp(&a.points));

        Self {
            key: game.key().to_string(),
            name: game.name().to_string(),
            results,
        }
    }
}
