/// Game domain model.
pub mod game;
/// Key, name and icon validators.
pub mod validation;

use std::sync::Arc;

use crate::dao::game_store::GameStore;

/// Shared handle to [`AppState`].
pub type SharedState = Arc<AppState>;

/// Central application state handed to every route.
pub struct AppState {
    game_store: Arc<dyn GameStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(game_store: Arc<dyn GameStore>) -> SharedState {
        Arc::new(Self { game_store })
    }

    /// Handle to the configured game store.
    pub fn game_store(&self) -> Arc<dyn GameStore> {
        Arc::clone(&self.game_store)
    }
}
