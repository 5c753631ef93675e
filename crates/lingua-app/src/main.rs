use std::future::Future;
use std::sync::Arc;

use clap::Parser;
use lingua_api::{HttpBackend, TranslationBackend};
use lingua_config::Config;
use lingua_store::{FileStore, KeyValueStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod io;
mod state;
mod ui;

use self::controller::AppController;
use self::state::AppState;

/// Interactive translation workspace client
#[derive(Parser, Debug)]
#[command(name = "lingua", version)]
struct Args {
    /// Override the translation service base URL
    #[arg(long)]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = Config::new();
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    let state = Arc::new(AppState::new(config));

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    run(state, shutdown).await
}

pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::default_location()?);
    let backend: Arc<dyn TranslationBackend> = {
        let config = state.config.read().await;
        Arc::new(HttpBackend::new(config.api.base_url.clone()))
    };

    let controller = AppController::new(state, store, backend);
    let mut tasks = controller.spawn_tasks(io::env_probe());

    tokio::select! {
        _ = shutdown => {
            tracing::info!("shutdown requested");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task exited"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
