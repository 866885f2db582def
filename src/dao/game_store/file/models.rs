use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dao::models::{GameEntity, PlayerEntity, VoteItemEntity};

pub const DOCUMENT_EXTENSION: &str = "json";

/// Game file contents: the game without its players, which live in their own files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameDocument {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<String>,
    pub items: Vec<VoteItemEntity>,
}

impl GameDocument {
    /// Split an entity into the game document and its player documents.
    pub fn from_entity(entity: GameEntity) -> (Self, Vec<PlayerEntity>) {
        let document = Self {
            key: entity.key,
            name: entity.name,
            css: entity.css,
            items: entity.items,
        };
        (document, entity.players)
    }

    /// Reattach the players read from the game's directory.
    pub fn into_entity(self, players: Vec<PlayerEntity>) -> GameEntity {
        GameEntity {
            key: self.key,
            name: self.name,
            css: self.css,
            items: self.items,
            players,
        }
    }
}

/// `<root>/<game-key>.json`
pub fn game_path(root: &Path, game_key: &str) -> PathBuf {
    root.join(format!("{game_key}.{DOCUMENT_EXTENSION}"))
}

/// `<root>/<game-key>/`
pub fn players_dir(root: &Path, game_key: &str) -> PathBuf {
    root.join(game_key)
}

/// `<root>/<game-key>/<player-name>.json`
pub fn player_path(root: &Path, game_key: &str, player_name: &str) -> PathBuf {
    players_dir(root, game_key).join(format!("{player_name}.{DOCUMENT_EXTENSION}"))
}

pub fn is_document(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == DOCUMENT_EXTENSION)
}
