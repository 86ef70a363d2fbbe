//! HTTP server initialization and runtime setup.
//!
//! Handles store connection, allocator wiring and the Axum server lifecycle.

use crate::application::services::CodeAllocator;
use crate::config::Config;
use crate::infrastructure::store;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The configured key-value store (Redis or in-memory)
/// - The code allocator with the configured escalation ladder
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The store cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = store::connect(&config).await?;

    let allocator = Arc::new(CodeAllocator::with_random_codes(
        store,
        config.allocation_policy.clone(),
    ));
    let state = AppState::new(allocator);

    if !config.static_dir.join("index.html").is_file() {
        tracing::warn!(
            "Landing page not found at {}",
            config.static_dir.join("index.html").display()
        );
    }

    let app = NormalizePathLayer::trim_trailing_slash().layer(app_router(state, &config.static_dir));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
