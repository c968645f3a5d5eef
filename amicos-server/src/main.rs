//! AMICOS Server
//!
//! Hosts the cornering engine behind a REST API and an SSE evaluation stream

use amicos_server::{api, config::ServerConfig, state};
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Starting AMICOS Server");
    info!(
        enforce_input_ranges = config.enforce_input_ranges,
        broadcast_capacity = config.broadcast_capacity,
        "Configuration loaded"
    );

    let addr = config.bind_addr;

    // Create application state
    let state = state::AppState::new(config);

    // Build the router
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
