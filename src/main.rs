//! Voting backend binary entrypoint wiring configuration, storage and the REST layer.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voting_back::{
    config::{AppConfig, StoreConfig},
    dao::{
        game_store::{FileGameStore, FileStoreConfig, GameStore, InMemoryGameStore},
        storage::StorageError,
    },
    routes, seed,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(config.store()).await?;
    if config.seed_sample_game() {
        seed_sample_game(store.as_ref()).await?;
    }

    let app = build_router(AppState::new(store));

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Instantiate the configured game store.
async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn GameStore>> {
    match config {
        StoreConfig::Memory => {
            info!("using in-memory game store; games are lost on restart");
            Ok(Arc::new(InMemoryGameStore::new()))
        }
        StoreConfig::File { path } => {
            let store = FileGameStore::open(FileStoreConfig::new(path))
                .await
                .with_context(|| format!("opening file store at {}", path.display()))?;
            info!(path = %path.display(), "using file game store");
            Ok(Arc::new(store))
        }
    }
}

/// Save the Eurovision 2024 game unless the store already holds it.
async fn seed_sample_game(store: &dyn GameStore) -> anyhow::Result<()> {
    match store.load_game(seed::EUROVISION24_KEY).await {
        Ok(_) => {
            info!(game = seed::EUROVISION24_KEY, "sample game already present");
            return Ok(());
        }
        Err(StorageError::GameNotFound { .. }) => {}
        Err(err) => return Err(err).context("looking up sample game"),
    }

    let game = seed::eurovision24_game().context("building sample game")?;
    store
        .save_game(game)
        .await
        .context("saving sample game")?;
    info!(game = seed::EUROVISION24_KEY, "sample game saved");
    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
