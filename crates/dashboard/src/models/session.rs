//! Session-related types.
//!
//! The authentication state exists in three places that must stay
//! consistent:
//!
//! 1. [`AuthSession`] - the full in-memory record handled by the session
//!    store during a request (includes transient `loading`/`error` flags).
//! 2. [`StoredAuth`] - the durable mirror persisted under
//!    [`session_keys::AUTH`] in the tower-sessions store.
//! 3. The `logged_in` boolean cookie read by the route guard, which runs
//!    without access to the durable store.
//!
//! Every mutation goes through the session store, which replaces the whole
//! record and updates all three representations together.

use serde::{Deserialize, Serialize};

use tillpoint_core::{CompanyId, Email, OutletId};

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for the single durable auth record. Individual fields (token,
    /// user email, outlet id, company id) are derived from this record
    /// rather than duplicated under flat keys.
    pub const AUTH: &str = "auth";
}

/// Name of the boolean cookie the route guard reads.
pub const LOGGED_IN_COOKIE: &str = "logged_in";

/// The in-memory authentication record.
///
/// Invariant: `logged_in` is true iff `token` is non-empty. The
/// constructors are the only way this type is built, so the invariant
/// cannot drift; mutations replace the record whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// Whether the session holds a valid login.
    pub logged_in: bool,
    /// Bearer token for API calls.
    pub token: Option<String>,
    /// Email the user logged in with.
    pub user_email: Option<Email>,
    /// Company the account belongs to.
    pub company_id: Option<CompanyId>,
    /// Outlet the session is scoped to.
    pub outlet_id: Option<OutletId>,
    /// True only while a login or register call is in flight. Records
    /// returned by store operations always have this reset to false.
    pub loading: bool,
    /// Displayable message from the last failed operation.
    pub error: Option<String>,
}

impl AuthSession {
    /// A logged-out record with all defaults.
    #[must_use]
    pub const fn logged_out() -> Self {
        Self {
            logged_in: false,
            token: None,
            user_email: None,
            company_id: None,
            outlet_id: None,
            loading: false,
            error: None,
        }
    }

    /// Build an authenticated record from a validated login.
    #[must_use]
    pub fn authenticated(
        token: String,
        user_email: Email,
        company_id: CompanyId,
        outlet_id: OutletId,
    ) -> Self {
        debug_assert!(!token.is_empty(), "authenticated sessions carry a token");
        Self {
            logged_in: true,
            token: Some(token),
            user_email: Some(user_email),
            company_id: Some(company_id),
            outlet_id: Some(outlet_id),
            loading: false,
            error: None,
        }
    }

    /// A logged-out record carrying the message of a failed operation.
    #[must_use]
    pub fn failed(error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::logged_out()
        }
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::logged_out()
    }
}

impl From<StoredAuth> for AuthSession {
    fn from(stored: StoredAuth) -> Self {
        // Re-derive the flag from the token; a hand-edited or partially
        // written record must not resurrect a token-less "login".
        let logged_in = stored.token.as_deref().is_some_and(|t| !t.is_empty());
        Self {
            logged_in,
            token: stored.token.filter(|t| !t.is_empty()),
            user_email: stored.user_email,
            company_id: stored.company_id,
            outlet_id: stored.outlet_id,
            loading: false,
            error: None,
        }
    }
}

/// The durable mirror of [`AuthSession`].
///
/// Persisted as one JSON record; the transient `loading`/`error` flags are
/// deliberately absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAuth {
    pub logged_in: bool,
    pub token: Option<String>,
    pub user_email: Option<Email>,
    pub company_id: Option<CompanyId>,
    pub outlet_id: Option<OutletId>,
}

impl From<&AuthSession> for StoredAuth {
    fn from(session: &AuthSession) -> Self {
        Self {
            logged_in: session.logged_in,
            token: session.token.clone(),
            user_email: session.user_email.clone(),
            company_id: session.company_id.clone(),
            outlet_id: session.outlet_id.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> AuthSession {
        AuthSession::authenticated(
            "T1".to_string(),
            Email::parse("a@b.com").unwrap(),
            CompanyId::new("C1"),
            OutletId::new("O1"),
        )
    }

    #[test]
    fn test_logged_out_defaults() {
        let session = AuthSession::default();
        assert!(!session.logged_in);
        assert!(session.token.is_none());
        assert!(session.user_email.is_none());
        assert!(session.company_id.is_none());
        assert!(session.outlet_id.is_none());
        assert!(!session.loading);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_authenticated_upholds_invariant() {
        let session = sample();
        assert!(session.logged_in);
        assert_eq!(session.token.as_deref(), Some("T1"));
        assert!(!session.loading);
        assert!(session.error.is_none());
    }

    #[test]
    fn test_failed_is_logged_out_with_message() {
        let session = AuthSession::failed("invalid credentials".to_string());
        assert!(!session.logged_in);
        assert!(session.token.is_none());
        assert_eq!(session.error.as_deref(), Some("invalid credentials"));
        assert!(!session.loading);
    }

    #[test]
    fn test_stored_mirror_drops_transient_flags() {
        let session = sample();
        let stored = StoredAuth::from(&session);
        let json = serde_json::to_value(&stored).unwrap();
        assert!(json.get("loading").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["token"], "T1");
        assert_eq!(json["logged_in"], true);
    }

    #[test]
    fn test_roundtrip_through_stored() {
        let session = sample();
        let restored = AuthSession::from(StoredAuth::from(&session));
        assert_eq!(restored, session);
    }

    #[test]
    fn test_stored_empty_token_restores_logged_out() {
        let stored = StoredAuth {
            logged_in: true,
            token: Some(String::new()),
            user_email: None,
            company_id: None,
            outlet_id: None,
        };
        let session = AuthSession::from(stored);
        assert!(!session.logged_in);
        assert!(session.token.is_none());
    }

    #[test]
    fn test_stored_missing_token_restores_logged_out() {
        let stored = StoredAuth {
            logged_in: true,
            token: None,
            user_email: None,
            company_id: None,
            outlet_id: None,
        };
        assert!(!AuthSession::from(stored).logged_in);
    }
}
