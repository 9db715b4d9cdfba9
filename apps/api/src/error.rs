//! Unified error handling for HTTP handlers.
//!
//! Every handler returns `Result<T, AppError>`; the error renders as
//! `{"detail": "..."}` with a matching status code.
//!
//! ```text
//! CoreError::Validation    ─┐
//! extractor rejection       ├──► AppError::Validation  → 422
//! DbError (other)          ─┼──► AppError::Database    → 500 (details logged)
//! CoreError::UnknownCountry ───► AppError::NotFound    → 404
//! duplicate email/username ────► AppError::Conflict    → 400
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use levy_core::{CoreError, ValidationError};
use levy_db::DbError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation.
    #[error("{0}")]
    Validation(String),

    /// Resource already exists.
    #[error("{0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownCountry(_) => AppError::NotFound(err.to_string()),
            CoreError::Validation(inner) => AppError::Validation(inner.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Database(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "Request error");
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::Validation("x".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(DbError::PoolExhausted).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unknown_country_is_not_found() {
        let err = AppError::from(CoreError::UnknownCountry("FR".into()));
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.to_string(), "Tax rate for country code 'FR' not found");
    }

    #[test]
    fn test_core_validation_is_unprocessable() {
        let err = AppError::from(CoreError::from(ValidationError::Negative {
            field: "amount".into(),
        }));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let response = AppError::Internal("secret".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
