/// JSON files on disk.
pub mod file;
/// Process memory.
pub mod memory;

use futures::future::BoxFuture;

use crate::dao::storage::StorageResult;
use crate::state::game::{Game, Player};

pub use file::{FileGameStore, FileStoreConfig};
pub use memory::InMemoryGameStore;

/// Abstraction over the authoritative collection of games.
///
/// Stores serialise the load-mutate-save sequence of [`GameStore::join_game`]
/// and [`GameStore::vote`] per game key.
pub trait GameStore: Send + Sync {
    /// Insert or replace the game stored under its key.
    fn save_game(&self, game: Game) -> BoxFuture<'static, StorageResult<()>>;
    /// Fetch a game, failing with `GameNotFound` when absent.
    fn load_game(&self, key: &str) -> BoxFuture<'static, StorageResult<Game>>;
    /// Add a fresh player to a game and return it.
    fn join_game(
        &self,
        key: &str,
        player_name: &str,
        join_as_existing: bool,
    ) -> BoxFuture<'static, StorageResult<Player>>;
    /// Record a player's choice for one vote item.
    fn vote(
        &self,
        player_name: &str,
        game_key: &str,
        item_key: &str,
        choice_key: &str,
    ) -> BoxFuture<'static, StorageResult<()>>;
    /// Check that the backend can currently serve requests.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
