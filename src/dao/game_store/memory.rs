use std::sync::Arc;

use dashmap::DashMap;
use futures::future::{self, BoxFuture};

use crate::{
    dao::{
        game_store::GameStore,
        storage::{StorageError, StorageResult},
    },
    state::game::{Game, Player},
};

/// Process-lifetime store keeping every game in a concurrent map.
///
/// Mutations run while holding the map entry, which serialises them per key.
#[derive(Clone, Default)]
pub struct InMemoryGameStore {
    games: Arc<DashMap<String, Game>>,
}

impl InMemoryGameStore {
    /// Build an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `games`.
    pub fn with_games(games: impl IntoIterator<Item = Game>) -> Self {
        let store = Self::new();
        for game in games {
            store.games.insert(game.key().to_string(), game);
        }
        store
    }

    fn load(&self, key: &str) -> StorageResult<Game> {
        self.games
            .get(key)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::game_not_found(key))
    }

    fn join(&self, key: &str, player_name: &str, join_as_existing: bool) -> StorageResult<Player> {
        let mut game = self
            .games
            .get_mut(key)
            .ok_or_else(|| StorageError::game_not_found(key))?;
        Ok(game.join(player_name, join_as_existing)?)
    }

    fn cast_vote(
        &self,
        player_name: &str,
        game_key: &str,
        item_key: &str,
        choice_key: &str,
    ) -> StorageResult<()> {
        let mut game = self
            .games
            .get_mut(game_key)
            .ok_or_else(|| StorageError::game_not_found(game_key))?;
        game.cast_vote(player_name, item_key, choice_key)?;
        Ok(())
    }
}

impl GameStore for InMemoryGameStore {
    fn save_game(&self, game: Game) -> BoxFuture<'static, StorageResult<()>> {
        self.games.insert(game.key().to_string(), game);
        Box::pin(future::ready(Ok(())))
    }

    fn load_game(&self, key: &str) -> BoxFuture<'static, StorageResult<Game>> {
        Box::pin(future::ready(self.load(key)))
    }

    fn join_game(
        &self,
        key: &str,
        player_name: &str,
        join_as_existing: bool,
    ) -> BoxFuture<'static, StorageResult<Player>> {
        Box::pin(future::ready(self.join(key, player_name, join_as_existing)))
    }

    fn vote(
        &self,
        player_name: &str,
        game_key: &str,
        item_key: &str,
        choice_key: &str,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let outcome = self.cast_vote(player_name, game_key, item_key, choice_key);
        Box::pin(future::ready(outcome))
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(future::ready(Ok(())))
    }
}
