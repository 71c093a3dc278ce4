//! EasyTube API Server
//!
//! A thin HTTP backend: given a YouTube URL it extracts the video id,
//! fetches the caption track, and optionally runs the text through an LLM
//! for analysis, reformatting, or translation. Stateless; every request is
//! an independent pipeline over the two outbound clients.

mod captions;
mod config;
mod error;
mod http;
mod llm;
mod state;
mod transform;
mod video_id;

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::error::{Result, ServerError};
use crate::http::create_router;
use crate::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
const APP_NAME: &str = "easytube-server";

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    tracing::info!("{} v{} starting", APP_NAME, VERSION);

    // Load configuration: optional TOML file, then environment overrides.
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = if std::path::Path::new(&config_path).exists() {
        match ServerConfig::from_file(&config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    config_path,
                    e
                );
                ServerConfig::default()
            }
        }
    } else {
        ServerConfig::default()
    };
    let config = config.with_env_overrides();

    // Create application state (outbound clients built here, once).
    let state = Arc::new(AppState::new(config.clone())?);
    if !state.llm.is_configured() {
        tracing::warn!("LLM credential missing; analyze/format/translate run degraded");
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = config
        .socket_addr()
        .parse()
        .map_err(|e| ServerError::Config(format!("invalid listen address: {}", e)))?;
    tracing::info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Initialize logging with tracing
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "easytube_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
