//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - Landing page (`<static_dir>/index.html`)
//! - `POST /shorten`  - Create or look up the short code for a URL
//! - `GET  /{code}`   - Redirect to the stored URL
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//!
//! Trailing-slash normalization wraps the finished router in
//! [`crate::server::run`].

use std::path::Path;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeFile;

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;

/// Constructs the application router.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory containing the landing page `index.html`
pub fn app_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .route("/shorten", post(shorten_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}
