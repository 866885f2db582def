/// Game definitions and summaries.
pub mod game;
/// Health check payloads.
pub mod health;
/// Join, item and vote payloads.
pub mod play;
