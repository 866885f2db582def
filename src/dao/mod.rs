/// Game persistence backends.
pub mod game_store;
/// Serializable entity definitions shared by the backends.
pub mod models;
/// Storage errors and result alias.
pub mod storage;
