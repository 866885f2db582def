use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use futures::future::BoxFuture;
use serde::{Serialize, de::DeserializeOwned};
use tokio::{
    fs,
    sync::{Mutex, OwnedMutexGuard},
};

use crate::{
    dao::{
        game_store::GameStore,
        models::{GameEntity, PlayerEntity},
        storage::{StorageError, StorageResult},
    },
    state::{
        game::{Game, Player},
        validation::validate_key,
    },
};

use super::{
    config::FileStoreConfig,
    error::{FileDaoError, FileResult},
    models::{GameDocument, game_path, is_document, player_path, players_dir},
};

/// Store writing one JSON file per game and one per player.
///
/// Read-modify-write sequences hold a per-game mutex so concurrent joins and
/// votes on the same game never overwrite each other.
#[derive(Clone)]
pub struct FileGameStore {
    inner: Arc<FileInner>,
}

struct FileInner {
    root: PathBuf,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl FileGameStore {
    /// Open the store, creating its root directory when missing.
    pub async fn open(config: FileStoreConfig) -> FileResult<Self> {
        fs::create_dir_all(&config.root)
            .await
            .map_err(|source| FileDaoError::CreateDirectory {
                path: config.root.clone(),
                source,
            })?;

        Ok(Self {
            inner: Arc::new(FileInner {
                root: config.root,
                locks: DashMap::new(),
            }),
        })
    }

    fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Serialise access to one game.
    ///
    /// Anything that is not a key cannot name a game and never reaches the
    /// lock table or the filesystem.
    async fn lock(&self, key: &str) -> StorageResult<GameLock> {
        if validate_key(key).is_err() {
            return Err(StorageError::game_not_found(key));
        }

        let mutex = self
            .inner
            .locks
            .entry(key.to_string())
            .or_default()
            .clone();
        let guard = mutex.lock_owned().await;
        Ok(GameLock {
            inner: Arc::clone(&self.inner),
            key: key.to_string(),
            guard: Some(guard),
        })
    }

    async fn read_game(&self, key: &str) -> StorageResult<Game> {
        let path = game_path(self.root(), key);
        let Some(document) = read_json::<GameDocument>(&path).await? else {
            return Err(StorageError::game_not_found(key));
        };
        let players = self.read_players(key).await?;

        Game::try_from(document.into_entity(players))
            .map_err(|source| FileDaoError::InvalidDocument { path, source }.into())
    }

    async fn read_players(&self, key: &str) -> FileResult<Vec<PlayerEntity>> {
        let dir = players_dir(self.root(), key);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(FileDaoError::ListPlayers { path: dir, source }),
        };

        let mut paths = Vec::new();
        while let Some(entry) =
            entries
                .next_entry()
                .await
                .map_err(|source| FileDaoError::ListPlayers {
                    path: dir.clone(),
                    source,
                })?
        {
            let path = entry.path();
            if is_document(&path) {
                paths.push(path);
            }
        }
        // Directory order is platform dependent.
        paths.sort();

        let mut players = Vec::with_capacity(paths.len());
        for path in paths {
            if let Some(player) = read_json::<PlayerEntity>(&path).await? {
                players.push(player);
            }
        }
        Ok(players)
    }

    async fn write_game(&self, game: &Game) -> FileResult<()> {
        let (document, players) = GameDocument::from_entity(GameEntity::from(game));
        write_json(&game_path(self.root(), &document.key), &document).await?;
        for player in &players {
            self.write_player(&document.key, player).await?;
        }
        Ok(())
    }

    async fn write_player(&self, game_key: &str, player: &PlayerEntity) -> FileResult<()> {
        let dir = players_dir(self.root(), game_key);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| FileDaoError::CreateDirectory {
                path: dir.clone(),
                source,
            })?;
        write_json(&player_path(self.root(), game_key, &player.name), player).await
    }
}

/// Held while a game is read or written; drops its lock table entry once no
/// other task is waiting on it.
struct GameLock {
    inner: Arc<FileInner>,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for GameLock {
    fn drop(&mut self) {
        drop(self.guard.take());
        self.inner
            .locks
            .remove_if(self.key.as_str(), |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

async fn read_json<T>(path: &Path) -> FileResult<Option<T>>
where
    T: DeserializeOwned,
{
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(FileDaoError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|source| FileDaoError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

async fn write_json<T>(path: &Path, document: &T) -> FileResult<()>
where
    T: ?Sized + Serialize,
{
    let payload = serde_json::to_vec_pretty(document).map_err(|source| FileDaoError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, payload)
        .await
        .map_err(|source| FileDaoError::Write {
            path: path.to_path_buf(),
            source,
        })
}

impl GameStore for FileGameStore {
    fn save_game(&self, game: Game) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let _lock = store.lock(game.key()).await?;
            store.write_game(&game).await.map_err(Into::into)
        })
    }

    fn load_game(&self, key: &str) -> BoxFuture<'static, StorageResult<Game>> {
        let store = self.clone();
        let key = key.to_string();
        Box::pin(async move {
            let _lock = store.lock(&key).await?;
            store.read_game(&key).await
        })
    }

    fn join_game(
        &self,
        key: &str,
        player_name: &str,
        join_as_existing: bool,
    ) -> BoxFuture<'static, StorageResult<Player>> {
        let store = self.clone();
        let key = key.to_string();
        let player_name = player_name.to_string();
        Box::pin(async move {
            let _lock = store.lock(&key).await?;

            let mut game = store.read_game(&key).await?;
            let player = game.join(&player_name, join_as_existing)?;
            store
                .write_player(&key, &PlayerEntity::from(&player))
                .await?;
            Ok(player)
        })
    }

    fn vote(
        &self,
        player_name: &str,
        game_key: &str,
        item_key: &str,
        choice_key: &str,
    ) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        let player_name = player_name.to_string();
        let game_key = game_key.to_string();
        let item_key = item_key.to_string();
        let choice_key = choice_key.to_string();
        Box::pin(async move {
            let _lock = store.lock(&game_key).await?;

            let mut game = store.read_game(&game_key).await?;
            let player = game.cast_vote(&player_name, &item_key, &choice_key)?;
            let document = PlayerEntity::from(player);
            store.write_player(&game_key, &document).await?;
            Ok(())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let root = store.root().to_path_buf();
            match fs::metadata(&root).await {
                Ok(metadata) if metadata.is_dir() => Ok(()),
                Ok(_) => Err(FileDaoError::Inaccessible {
                    path: root,
                    source: ErrorKind::NotADirectory.into(),
                }
                .into()),
                Err(source) => Err(FileDaoError::Inaccessible { path: root, source }.into()),
            }
        })
    }
}
