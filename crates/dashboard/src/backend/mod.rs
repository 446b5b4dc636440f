//! Tillpoint REST API client.
//!
//! Single outbound gateway to the Tillpoint backend. All request
//! construction happens here: the caller supplies the bearer token (if any)
//! and every helper attaches it, maps unauthorized responses to
//! [`BackendError::Unauthorized`], and surfaces backend rejection messages
//! verbatim so the session layer can show them to the user.
//!
//! The global reaction to an unauthorized response (clear the stored session
//! and force navigation to the login page) lives in
//! `middleware::unauthorized`, not here - callers only ever see the typed
//! error.
//!
//! # Example
//!
//! ```rust,ignore
//! use tillpoint_dashboard::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend);
//!
//! // Authenticate
//! let login = client.login("user@example.com", "secret").await?;
//!
//! // Use the token for scoped reads
//! let category = client.category(Some(&login.token), &category_id).await?;
//! ```

mod types;

pub use types::*;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use tillpoint_core::{CategoryId, CustomerId, SupplierId};

use crate::config::BackendConfig;

/// Errors that can occur when talking to the Tillpoint API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request (bad credentials, duplicate
    /// registration, validation failure). Carries the backend-provided
    /// message when the payload had one.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message extracted from the response payload, or the raw body.
        message: String,
    },

    /// The backend returned an unauthorized status. Handled globally by the
    /// unauthorized-response middleware; callers still receive this error.
    #[error("unauthorized")]
    Unauthorized,

    /// The response parsed as JSON but did not match the documented shape.
    #[error("malformed response: {0}")]
    MalformedResponse(&'static str),
}

impl BackendError {
    /// The backend-provided rejection message, if this error carries one.
    #[must_use]
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

/// Error body shapes the API uses for rejections.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Client for the Tillpoint REST API.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// Get the API base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the backend rejects the
    /// credentials, or the response is missing the expected nested fields.
    pub async fn login(&self, email: &str, password: &str) -> Result<Login, BackendError> {
        let response: LoginResponse = self
            .post_json("/v1/app/auth/login", &LoginRequest { email, password }, None)
            .await?;
        response.into_login()
    }

    /// Create a new merchant account. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// registration (e.g., duplicate email).
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), BackendError> {
        self.post_no_content("/v1/app/auth/register", request, None)
            .await
    }

    /// Request a password reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn forgot_password(&self, email: &str) -> Result<(), BackendError> {
        self.post_no_content("/v1/app/auth/forgot-password", &ForgotPasswordRequest { email }, None)
            .await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Master Data Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch a category by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unauthorized.
    pub async fn category(
        &self,
        token: Option<&str>,
        id: &CategoryId,
    ) -> Result<Category, BackendError> {
        let envelope: Envelope<Category> = self
            .get_json(&format!("/v1/app/categories/{id}"), token)
            .await?;
        Ok(envelope.data)
    }

    /// Fetch a customer by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unauthorized.
    pub async fn customer(
        &self,
        token: Option<&str>,
        id: &CustomerId,
    ) -> Result<Customer, BackendError> {
        let envelope: Envelope<Customer> = self
            .get_json(&format!("/v1/app/customers/{id}"), token)
            .await?;
        Ok(envelope.data)
    }

    /// Fetch a supplier by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the session is unauthorized.
    pub async fn supplier(
        &self,
        token: Option<&str>,
        id: &SupplierId,
    ) -> Result<Supplier, BackendError> {
        let envelope: Envelope<Supplier> = self
            .get_json(&format!("/v1/app/suppliers/{id}"), token)
            .await?;
        Ok(envelope.data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Execute a GET request and deserialize the JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self.inner.client.get(&url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Execute a POST request and deserialize the JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self.inner.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Execute a POST request where only the status matters.
    async fn post_no_content<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<(), BackendError> {
        let url = format!("{}{path}", self.inner.base_url);

        let mut request = self.inner.client.post(&url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map non-success statuses to typed errors.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BackendError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        Ok(response)
    }
}

/// Pull a human-readable message out of a rejection body.
///
/// The API is inconsistent about the key (`message` vs `error`); fall back
/// to the raw body so nothing is swallowed.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message.or(parsed.error))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 422,
            message: "email already taken".to_string(),
        };
        assert_eq!(err.to_string(), "API error (422): email already taken");

        let err = BackendError::Unauthorized;
        assert_eq!(err.to_string(), "unauthorized");

        let err = BackendError::MalformedResponse("login response has no token");
        assert_eq!(
            err.to_string(),
            "malformed response: login response has no token"
        );
    }

    #[test]
    fn test_api_message_present() {
        let err = BackendError::Api {
            status: 400,
            message: "invalid credentials".to_string(),
        };
        assert_eq!(err.api_message(), Some("invalid credentials"));
    }

    #[test]
    fn test_api_message_absent() {
        assert!(BackendError::Unauthorized.api_message().is_none());
        let err = BackendError::Api {
            status: 500,
            message: String::new(),
        };
        assert!(err.api_message().is_none());
    }

    #[test]
    fn test_extract_message_from_message_key() {
        assert_eq!(
            extract_message(r#"{"message":"email already taken"}"#),
            "email already taken"
        );
    }

    #[test]
    fn test_extract_message_from_error_key() {
        assert_eq!(
            extract_message(r#"{"error":"invalid credentials"}"#),
            "invalid credentials"
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_body() {
        assert_eq!(extract_message("upstream timeout"), "upstream timeout");
    }
}
