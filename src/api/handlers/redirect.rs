//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Responds with `302 Found` and the stored URL in `Location`.
///
/// # Errors
///
/// - 404 Not Found if the short code doesn't exist
/// - 503 Service Unavailable if the store cannot be reached
/// - 500 Internal Server Error if the stored URL cannot be sent as a header
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.allocator.resolve(&code).await?;
    debug!(code = %code, "Redirecting");

    let location = HeaderValue::try_from(target)
        .map_err(|_| AppError::internal("Stored URL cannot be used as a redirect target"))?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}
