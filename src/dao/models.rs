use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Selectable option of a vote item as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChoiceEntity {
    /// Identifier of the choice, unique within its item.
    pub key: String,
    /// Label shown to players.
    pub text: String,
    /// Signed number of points awarded when picked.
    pub value: i32,
}

/// Vote item definition as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteItemEntity {
    /// Identifier of the item, unique within its game.
    pub key: String,
    /// Optional short icon (e.g. a flag emoji).
    #[serde(default)]
    pub icon: Option<String>,
    /// Display title.
    pub title: String,
    /// Longer description.
    pub text: String,
    /// Optional illustration.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Choices offered for this item.
    pub options: Vec<ChoiceEntity>,
}

/// Player and their votes as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Display name, also used as identity within a game.
    pub name: String,
    /// Choice key keyed by vote item key.
    #[serde(default)]
    pub votes: IndexMap<String, String>,
}

/// Aggregate game entity exchanged with the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameEntity {
    /// Primary key of the game.
    pub key: String,
    /// Display name of the game.
    pub name: String,
    /// Optional stylesheet served alongside the game.
    #[serde(default)]
    pub css: Option<String>,
    /// Ordered vote items.
    pub items: Vec<VoteItemEntity>,
    /// Joined players, in join order.
    #[serde(default)]
    pub players: Vec<PlayerEntity>,
}
