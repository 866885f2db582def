use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::state::game::{Choice, Game, Player, VoteItem};

/// Payload used to define a brand-new game.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGameRequest {
    /// Free-text title; the key is slugified from it when omitted.
    #[validate(length(min = 1, message = "a game requires a name"))]
    pub name: String,
    /// Explicit key; derived from `name` when omitted.
    #[serde(default)]
    pub key: Option<String>,
    /// Stylesheet served at `/games/{key}/style.css`.
    #[serde(default)]
    pub css: Option<String>,
    /// Vote items in display order.
    #[validate(
        length(min = 1, message = "a game requires at least one vote item"),
        nested
    )]
    pub items: Vec<VoteItemInput>,
}

/// Vote item definition supplied when creating a game.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct VoteItemInput {
    /// Explicit key; derived from `title` when omitted.
    #[serde(default)]
    pub key: Option<String>,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub text: String,
    /// Short icon, at most two characters (e.g. a flag emoji).
    #[serde(default)]
    pub icon: Option<String>,
    /// Illustration URL.
    #[serde(default)]
    #[validate(url)]
    pub image_url: Option<String>,
    /// Choices offered for the item.
    #[validate(length(min = 1, message = "a vote item requires at least one choice"))]
    pub options: Vec<ChoiceInput>,
}

/// Choice offered by a vote item.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChoiceInput {
    /// Key unique within the item.
    pub key: String,
    /// Label shown to players.
    pub text: String,
    /// Points awarded when picked.
    pub value: i32,
}

impl TryFrom<ChoiceInput> for Choice {
    type Error = ValidationErrors;

    fn try_from(input: ChoiceInput) -> Result<Self, Self::Error> {
        Choice::new(input.key, input.text, input.value)
    }
}

impl TryFrom<VoteItemInput> for VoteItem {
    type Error = ValidationErrors;

    fn try_from(input: VoteItemInput) -> Result<Self, Self::Error> {
        let options = input
            .options
            .into_iter()
            .map(Choice::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut item = match input.key {
            Some(key) => VoteItem::with_key(key, input.title, input.text, options)?,
            None => VoteItem::new(input.title, input.text, options)?,
        };
        if let Some(icon) = input.icon {
            item = item.with_icon(icon)?;
        }
        if let Some(image_url) = input.image_url {
            item = item.with_image_url(image_url);
        }
        Ok(item)
    }
}

impl TryFrom<CreateGameRequest> for Game {
    type Error = ValidationErrors;

    fn try_from(request: CreateGameRequest) -> Result<Self, Self::Error> {
        request.validate()?;

        let items = request
            .items
            .into_iter()
            .map(VoteItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Game::new(request.name, request.key.as_deref())?
            .with_items(items)?
            .with_css(request.css))
    }
}

/// Summary of a game, returned by the game page and on creation.
#[derive(Debug, Serialize, ToSchema)]
pub struct GameSummary {
    /// Key of the game.
    pub key: String,
    /// Name of the game.
    pub name: String,
    /// Whether `/games/{key}/style.css` serves a stylesheet.
    pub has_css: bool,
    /// Vote items in display order.
    pub items: Vec<VoteItemSummary>,
    /// Players in join order.
    pub players: Vec<PlayerSummary>,
}

/// Vote item as shown to players.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VoteItemSummary {
    /// Key of the item.
    pub key: String,
    /// Short icon, if any.
    pub icon: Option<String>,
    /// Display title.
    pub title: String,
    /// Description.
    pub text: String,
    /// Illustration URL, if any.
    pub image_url: Option<String>,
    /// Choices in declaration order.
    pub options: Vec<ChoiceSummary>,
}

/// Choice as shown to players.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChoiceSummary {
    /// Key of the choice.
    pub key: String,
    /// Label.
    pub text: String,
    /// Points awarded when picked.
    pub value: i32,
}

/// Player listed on the game page.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerSummary {
    /// Name the player joined with.
    pub name: String,
    /// Number of items this player voted on.
    pub voted: usize,
}

impl From<&Choice> for ChoiceSummary {
    fn from(choice: &Choice) -> Self {
        Self {
            key: choice.key().to_string(),
            text: choice.text().to_string(),
            value: choice.value(),
        }
    }
}

impl From<&VoteItem> for VoteItemSummary {
    fn from(item: &VoteItem) -> Self {
        Self {
            key: item.key().to_string(),
            icon: item.icon().map(str::to_string),
            title: item.title().to_string(),
            text: item.text().to_string(),
            image_url: item.image_url().map(str::to_string),
            options: item.options().iter().map(Into::into).collect(),
        }
    }
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            voted: player.votes().len(),
        }
    }
}

impl From<&Game> for GameSummary {
    fn from(game: &Game) -> Self {
        Self {
            key: game.key().to_string(),
            name: game.name().to_string(),
            has_css: game.css().is_some(),
            items: game.items().iter().map(Into::into).collect(),
            players: game.players().iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> CreateGameRequest {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn request_builds_game_with_derived_keys() {
        let game = Game::try_from(request(serde_json::json!({
            "name": "Song Contest",
            "css": "body { margin: 0; }",
            "items": [
                {
                    "title": "United Kingdom",
                    "text": "Olly Alexander - Dizzy",
                    "icon": "🇬🇧",
                    "options": [{ "key": "yes", "text": "Yes", "value": 1 }]
                },
                {
                    "key": "custom",
                    "title": "Other",
                    "options": [{ "key": "yes", "text": "Yes", "value": 1 }]
                }
            ]
        })))
        .unwrap();

        assert_eq!(game.key(), "song-contest");
        assert_eq!(game.css(), Some("body { margin: 0; }"));
        assert_eq!(game.items()[0].key(), "united-kingdom");
        assert_eq!(game.items()[0].icon(), Some("🇬🇧"));
        assert_eq!(game.items()[1].key(), "custom");
        assert_eq!(game.items()[1].text(), "");
    }

    #[test]
    fn free_text_name_is_accepted() {
        let game = Game::try_from(request(serde_json::json!({
            "name": "Is this correct?   Not really.",
            "items": [{ "title": "Item", "options": [{ "key": "a", "text": "A", "value": 1 }] }]
        })))
        .unwrap();
        assert_eq!(game.key(), "is-this-correct-not-really");
        assert_eq!(game.name(), "Is this correct?   Not really.");
    }

    #[test]
    fn request_without_items_is_rejected() {
        let err = Game::try_from(request(serde_json::json!({ "name": "Empty", "items": [] })))
            .unwrap_err();
        assert!(err.field_errors().contains_key("items"));
    }

    #[test]
    fn item_without_choices_is_rejected() {
        let err = Game::try_from(request(serde_json::json!({
            "name": "No choices",
            "items": [{ "title": "Item", "options": [] }]
        })))
        .unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn duplicate_choice_keys_are_rejected() {
        let result = Game::try_from(request(serde_json::json!({
            "name": "Dup",
            "items": [{
                "title": "Item",
                "options": [
                    { "key": "a", "text": "A", "value": 1 },
                    { "key": "a", "text": "Again", "value": 2 }
                ]
            }]
        })));
        assert!(result.is_err());
    }

    #[test]
    fn invalid_explicit_key_is_rejected() {
        let result = Game::try_from(request(serde_json::json!({
            "name": "Bad key",
            "key": "not a key",
            "items": [{ "title": "Item", "options": [{ "key": "a", "text": "A", "value": 1 }] }]
        })));
        assert!(result.is_err());
    }

    #[test]
    fn summary_counts_votes_per_player() {
        let mut game = Game::try_from(request(serde_json::json!({
            "name": "Summary",
            "items": [{ "title": "Item", "options": [{ "key": "a", "text": "A", "value": 1 }] }]
        })))
        .unwrap();
        game.join("A", false).unwrap();
        game.join("B", false).unwrap();
        game.cast_vote("A", "item", "a").unwrap();

        let summary = GameSummary::from(&game);
        assert!(!summary.has_css);
        assert_eq!(summary.players[0].voted, 1);
        assert_eq!(summary.players[1].voted, 0);
        assert_eq!(summary.items[0].options[0].key, "a");
    }
}
