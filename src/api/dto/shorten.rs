//! DTOs for the shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. Only surrounding whitespace is removed.
    #[validate(custom(function = "not_blank"))]
    pub url: String,
}

/// Response carrying the site-relative short URL, e.g. `/abc123`.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
}

impl ShortenResponse {
    pub fn for_code(code: &str) -> Self {
        Self {
            short_url: format!("/{}", code),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("URL must not be empty".into()));
    }
    Ok(())
}
