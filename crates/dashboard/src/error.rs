//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//!
//! An unauthorized backend error becomes a bare `401` here; the
//! unauthorized-response middleware then turns that status into the global
//! "clear session and redirect to login" reaction, so the taxonomy stays in
//! one place.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;
use crate::services::session::SessionError;

/// Application-level error type for the dashboard.
#[derive(Debug, Error)]
pub enum AppError {
    /// Tillpoint API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error came from an unauthorized backend response.
    fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized(_)
                | Self::Backend(BackendError::Unauthorized)
                | Self::Session(SessionError::Backend(BackendError::Unauthorized))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server-side failures to Sentry
        if matches!(
            self,
            Self::Internal(_) | Self::Backend(_) | Self::Session(SessionError::Storage(_))
        ) && !self.is_unauthorized()
        {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = if self.is_unauthorized() {
            StatusCode::UNAUTHORIZED
        } else {
            match &self {
                Self::Backend(BackendError::Api { status, .. }) => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                Self::Backend(_) => StatusCode::BAD_GATEWAY,
                Self::Session(SessionError::Storage(_)) | Self::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                Self::Session(_) => StatusCode::BAD_REQUEST,
                Self::NotFound(_) => StatusCode::NOT_FOUND,
                Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(_) => "External service error".to_string(),
            Self::Session(SessionError::Storage(_)) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
            Self::Session(err) => err.user_message(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
