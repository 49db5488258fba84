// ABOUTME: Entry point for the alexa-relay binary.
// ABOUTME: Loads .env and CLI overrides, initializes tracing, and serves the relay until Ctrl+C.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use relay_server::secrets::resolve_credentials;
use relay_server::{AppState, ConfigOverrides, EnvSecrets, RelayConfig, create_router};
use relay_store::{FileStore, MemoryStore, MetadataStore};

/// Relay "now playing" metadata from Music Assistant to an Alexa skill.
#[derive(Debug, Parser)]
#[command(name = "alexa-relay", version, about)]
struct Cli {
    /// Socket address to listen on (overrides RELAY_BIND).
    #[arg(long)]
    bind: Option<String>,

    /// File holding the latest record (overrides RELAY_STORE_PATH).
    #[arg(long)]
    store_path: Option<PathBuf>,

    /// Keep the record in memory only; nothing survives a restart.
    #[arg(long, conflicts_with = "store_path")]
    memory_store: bool,

    /// Favicon file to serve (overrides RELAY_FAVICON).
    #[arg(long)]
    favicon: Option<PathBuf>,

    /// Path prefix for every route, e.g. /ma (overrides RELAY_ROUTE_PREFIX).
    #[arg(long)]
    route_prefix: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal; only the environment matters after this.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "alexa_relay=info,relay_server=info,relay_store=info,tower_http=info",
                )
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = RelayConfig::load(ConfigOverrides {
        bind: cli.bind,
        store_path: cli.store_path,
        favicon_path: cli.favicon,
        route_prefix: cli.route_prefix,
    })?;

    let store: Arc<dyn MetadataStore> = if cli.memory_store {
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(FileStore::new(config.store_path.clone()))
    };

    let credentials = resolve_credentials(&EnvSecrets);
    if let Some(credentials) = &credentials {
        tracing::info!(username = credentials.username(), "basic auth enabled");
    } else {
        tracing::info!("basic auth disabled: API_USERNAME and API_PASSWORD are not both set");
    }

    tracing::info!(store = %store.describe(), "using metadata store");
    if let Some(path) = &config.favicon_path {
        tracing::debug!(path = %path.display(), "favicon location");
    }

    let state = Arc::new(AppState::new(store).with_favicon(config.favicon_path.clone()));
    let app = create_router(state, credentials, &config.route_prefix);

    serve(app, config.bind).await
}

async fn serve(app: axum::Router, bind: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;

    tracing::info!("alexa-relay listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("alexa-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
