//! Session store error types.

use thiserror::Error;

use tillpoint_core::{EmailError, PhoneError};

use crate::backend::BackendError;

/// Fallback message when the backend rejection carries no usable text.
pub const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur during session store operations.
///
/// Validation variants are produced before any network call; the rest wrap
/// the backend and storage layers. Every variant maps to a displayable
/// message via [`SessionError::user_message`] - nothing escapes the store
/// without one.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A required form field was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The email field did not parse.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The phone field did not coerce to the numeric wire format.
    #[error("invalid phone: {0}")]
    InvalidPhone(#[from] PhoneError),

    /// The backend call failed.
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    /// The durable session store could not be written.
    #[error("session storage error: {0}")]
    Storage(#[from] tower_sessions::session::Error),
}

impl SessionError {
    /// The message shown to the user.
    ///
    /// Backend rejections surface the backend-provided message when the
    /// payload had one; transport, storage, and malformed-response failures
    /// collapse to the default fallback so internals never leak into forms.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingField(field) => format!("Please fill in the {field} field."),
            Self::InvalidEmail(_) => "Please enter a valid email address.".to_string(),
            Self::InvalidPhone(_) => "Please enter a valid phone number.".to_string(),
            Self::Backend(err) => err
                .api_message()
                .map_or_else(|| DEFAULT_ERROR_MESSAGE.to_string(), ToString::to_string),
            Self::Storage(_) => DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}
