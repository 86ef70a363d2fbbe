//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the short URL for a long URL, allocating a code on first use.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// ```json
/// { "short_url": "/aB3dE9" }
/// ```
///
/// Submitting the same URL again (ignoring surrounding whitespace) returns
/// the same short URL.
///
/// # Errors
///
/// - 400 Bad Request if the body is not a JSON object with a `url` string,
///   or the URL is blank
/// - 503 Service Unavailable if the store cannot be reached
/// - 500 Internal Server Error if no free code could be allocated
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let code = state.allocator.shorten(&payload.url).await?;

    Ok(Json(ShortenResponse::for_code(&code)))
}
