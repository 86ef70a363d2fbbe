//! HTTP-facing error type.
//!
//! Every handler returns `Result<_, AppError>`; the [`IntoResponse`] impl
//! renders a JSON body of the form `{"detail": "...", "code": "..."}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::application::services::AllocatorError;
use crate::domain::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    detail: String,
    code: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Unavailable { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Unavailable { .. } => "store_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            code: self.kind(),
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<AllocatorError> for AppError {
    fn from(err: AllocatorError) -> Self {
        match err {
            AllocatorError::EmptyUrl => AppError::bad_request("URL must not be empty"),
            AllocatorError::NotFound { .. } => AppError::not_found("URL not found"),
            AllocatorError::AllocationExhausted { attempts } => {
                tracing::error!(attempts, "Could not allocate a short code");
                AppError::internal("Could not allocate a short code")
            }
            AllocatorError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("Store error: {}", err);
        match err {
            StoreError::Unavailable(_) => AppError::unavailable("Storage is temporarily unavailable"),
            StoreError::UnexpectedReply(_) => AppError::internal("Storage returned an unexpected reply"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "Rejected request body");
        AppError::bad_request(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        fields.sort();
        AppError::bad_request(format!("Invalid request: {}", fields.join(", ")))
    }
}
