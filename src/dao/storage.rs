use std::error::Error;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::game::GameError;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by game stores regardless of the backend.
///
/// Every integrity violation keeps the keys and names needed to describe it.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No game is stored under `key`.
    #[error("game `{key}` not found")]
    GameNotFound {
        /// Requested game key.
        key: String,
    },
    /// See [`GameError::PlayerAlreadyExists`].
    #[error("player `{player_name}` already exists in game `{game_name}`")]
    PlayerAlreadyExists {
        /// Name of the game.
        game_name: String,
        /// Name that is already taken.
        player_name: String,
    },
    /// See [`GameError::PlayerNotFound`].
    #[error("player `{player_name}` not found in game `{game_name}`")]
    PlayerNotFound {
        /// Unknown player name.
        player_name: String,
        /// Name of the game.
        game_name: String,
    },
    /// See [`GameError::VoteItemNotFound`].
    #[error("vote item `{item_key}` not found in game `{game_name}`")]
    VoteItemNotFound {
        /// Unknown vote item key.
        item_key: String,
        /// Name of the game.
        game_name: String,
    },
    /// See [`GameError::ChoiceNotFound`].
    #[error("choice `{choice_key}` not found for item `{item_key}` in game `{game_name}`")]
    ChoiceNotFound {
        /// Unknown choice key.
        choice_key: String,
        /// Vote item the choice was looked up in.
        item_key: String,
        /// Name of the game.
        game_name: String,
    },
    /// A stored or submitted entity breaks a model invariant.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The backend itself failed.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// What the backend was doing.
        message: String,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    pub(crate) fn game_not_found(key: impl Into<String>) -> Self {
        StorageError::GameNotFound { key: key.into() }
    }
}

impl From<GameError> for StorageError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::PlayerAlreadyExists {
                game_name,
                player_name,
            } => StorageError::PlayerAlreadyExists {
                game_name,
                player_name,
            },
            GameError::PlayerNotFound {
                player_name,
                game_name,
            } => StorageError::PlayerNotFound {
                player_name,
                game_name,
            },
            GameError::VoteItemNotFound {
                item_key,
                game_name,
            } => StorageError::VoteItemNotFound {
                item_key,
                game_name,
            },
            GameError::ChoiceNotFound {
                choice_key,
                item_key,
                game_name,
            } => StorageError::ChoiceNotFound {
                choice_key,
                item_key,
                game_name,
            },
            GameError::Validation(errors) => StorageError::Validation(errors),
        }
    }
}
