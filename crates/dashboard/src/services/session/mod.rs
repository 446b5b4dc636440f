//! The session store: the single writer of authentication state.
//!
//! A [`SessionStore`] is constructed per request (it is an axum extractor)
//! and is the only component that mutates the durable auth record and the
//! `logged_in` cookie. Consumers - route handlers, middleware - take it as
//! a dependency and go through its interface: [`current`](SessionStore::current),
//! [`login`](SessionStore::login), [`register`](SessionStore::register),
//! [`logout`](SessionStore::logout).
//!
//! Operations never panic and never leak transport errors: every failure
//! path produces a [`SessionError`] with a displayable
//! [`user_message`](SessionError::user_message), and the durable record is
//! left logged out. Mutations replace the whole record and hand back the
//! matching `Set-Cookie` in a [`SessionUpdate`], so memory, durable storage,
//! and the guard cookie cannot drift apart.

mod error;

pub use error::{DEFAULT_ERROR_MESSAGE, SessionError};

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::SET_COOKIE, request::Parts},
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use serde::Deserialize;
use tower_sessions::Session;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use tillpoint_core::{Email, Phone};

use crate::backend::{BackendClient, RegisterRequest};
use crate::models::{AuthSession, LOGGED_IN_COOKIE, StoredAuth, session_keys};
use crate::state::AppState;

/// Lifetime of the `logged_in` cookie after a successful login.
const LOGGED_IN_COOKIE_HOURS: i64 = 24;

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// Per-request handle over the durable session record and the API client.
#[derive(Clone)]
pub struct SessionStore {
    session: Session,
    backend: BackendClient,
}

/// The result of a session mutation: the new in-memory record plus the
/// cookie that mirrors it. Attaching the update to a response (it is
/// `IntoResponseParts`) stamps the `Set-Cookie` header.
#[derive(Debug)]
pub struct SessionUpdate {
    /// The record after the mutation.
    pub record: AuthSession,
    cookie: Cookie<'static>,
}

impl SessionUpdate {
    /// The serialized `Set-Cookie` value.
    #[must_use]
    pub fn cookie_value(&self) -> String {
        self.cookie.to_string()
    }
}

impl IntoResponseParts for SessionUpdate {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut parts: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Ok(value) = axum::http::HeaderValue::from_str(&self.cookie.to_string()) {
            parts.headers_mut().append(SET_COOKIE, value);
        }
        Ok(parts)
    }
}

/// Registration form input. Fields are checked for presence only; the
/// backend owns every further rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterInput {
    pub business_name: String,
    pub business_address: String,
    pub referral_code: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl SessionStore {
    /// Create a store over an extracted session and the API client.
    #[must_use]
    pub const fn new(session: Session, backend: BackendClient) -> Self {
        Self { session, backend }
    }

    /// The current authentication record.
    ///
    /// Loads the durable record; an absent or unreadable record yields the
    /// logged-out defaults. The logged-in flag is re-derived from the
    /// stored token, so a corrupt record cannot fake a login.
    pub async fn current(&self) -> AuthSession {
        self.session
            .get::<StoredAuth>(session_keys::AUTH)
            .await
            .ok()
            .flatten()
            .map(AuthSession::from)
            .unwrap_or_default()
    }

    /// Authenticate against the backend and establish the session.
    ///
    /// On success the durable record and the 24-hour `logged_in` cookie are
    /// written together with the returned in-memory record. On failure the
    /// session stays logged out and the error carries a displayable
    /// message.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for empty fields, backend rejection,
    /// malformed login payloads, or storage failures.
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionUpdate, SessionError> {
        let email = require(email, "email")?;
        if password.is_empty() {
            return Err(SessionError::MissingField("password"));
        }
        let email = Email::parse(email)?;

        let login = self.backend.login(email.as_str(), password).await?;

        let record = AuthSession::authenticated(
            login.token,
            email,
            login.company_id,
            login.outlet_id,
        );
        self.session
            .insert(session_keys::AUTH, StoredAuth::from(&record))
            .await?;

        tracing::info!(user = %record.user_email.as_ref().map_or("", Email::as_str), "login succeeded");

        Ok(SessionUpdate {
            record,
            cookie: logged_in_cookie(),
        })
    }

    /// Create a merchant account. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for missing fields, a non-numeric phone, or
    /// backend rejection.
    pub async fn register(&self, input: RegisterInput) -> Result<(), SessionError> {
        let request = RegisterRequest {
            business_name: require(&input.business_name, "business name")?.to_string(),
            business_address: require(&input.business_address, "business address")?.to_string(),
            referral_code: require(&input.referral_code, "referral code")?.to_string(),
            name: require(&input.name, "name")?.to_string(),
            email: Email::parse(require(&input.email, "email")?)?.into_inner(),
            phone: Phone::parse(require(&input.phone, "phone")?)?,
            password: {
                if input.password.is_empty() {
                    return Err(SessionError::MissingField("password"));
                }
                input.password
            },
        };

        self.backend.register(&request).await?;
        Ok(())
    }

    /// Request a password reset email for the given address.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for an empty email or backend failure.
    pub async fn forgot_password(&self, email: &str) -> Result<(), SessionError> {
        let email = require(email, "email")?;
        self.backend.forgot_password(email).await?;
        Ok(())
    }

    /// Clear the session everywhere: memory defaults, durable record
    /// removed, cookie expired immediately.
    ///
    /// Idempotent - logging out an already logged-out session is a no-op
    /// that produces the same end state.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Storage`] if the durable record cannot be
    /// removed.
    pub async fn logout(&self) -> Result<SessionUpdate, SessionError> {
        let _previous = self
            .session
            .remove::<StoredAuth>(session_keys::AUTH)
            .await?;

        Ok(SessionUpdate {
            record: AuthSession::logged_out(),
            cookie: logged_out_cookie(),
        })
    }
}

/// Presence check for a required form field.
fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, SessionError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SessionError::MissingField(field));
    }
    Ok(trimmed)
}

// ─────────────────────────────────────────────────────────────────────────────
// Cookies
// ─────────────────────────────────────────────────────────────────────────────

/// The cookie written on login: `logged_in=true`, 24h lifetime.
///
/// Deliberately carries only the boolean - the route guard never needs the
/// token, and the token never leaves the durable store.
#[must_use]
pub fn logged_in_cookie() -> Cookie<'static> {
    Cookie::build((LOGGED_IN_COOKIE, "true"))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::hours(LOGGED_IN_COOKIE_HOURS))
        .build()
}

/// The cookie written on logout: `logged_in=false`, expired immediately.
#[must_use]
pub fn logged_out_cookie() -> Cookie<'static> {
    Cookie::build((LOGGED_IN_COOKIE, "false"))
        .path("/")
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}

/// Remove the durable auth record. Used by the unauthorized-response
/// middleware, which reacts to 401s from any call site.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_stored_auth(session: &Session) -> Result<(), tower_sessions::session::Error> {
    let _previous = session.remove::<StoredAuth>(session_keys::AUTH).await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Extraction
// ─────────────────────────────────────────────────────────────────────────────

/// Rejection when the session layer is not installed.
pub struct SessionLayerMissing;

impl IntoResponse for SessionLayerMissing {
    fn into_response(self) -> Response {
        tracing::error!("session layer missing from middleware stack");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl FromRequestParts<AppState> for SessionStore {
    type Rejection = SessionLayerMissing;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(SessionLayerMissing)?;

        Ok(Self::new(session, state.backend().clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_trims_and_accepts() {
        assert_eq!(require("  a@b.com  ", "email").unwrap(), "a@b.com");
    }

    #[test]
    fn test_require_rejects_blank() {
        let err = require("   ", "email").unwrap_err();
        assert!(matches!(err, SessionError::MissingField("email")));
    }

    #[test]
    fn test_logged_in_cookie_shape() {
        let cookie = logged_in_cookie();
        assert_eq!(cookie.name(), LOGGED_IN_COOKIE);
        assert_eq!(cookie.value(), "true");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::hours(24)));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn test_logged_out_cookie_expires_immediately() {
        let cookie = logged_out_cookie();
        assert_eq!(cookie.value(), "false");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_cookie_serializes_with_attributes() {
        let value = logged_in_cookie().to_string();
        assert!(value.starts_with("logged_in=true"));
        assert!(value.contains("Path=/"));
        assert!(value.contains("Max-Age=86400"));
    }
}
