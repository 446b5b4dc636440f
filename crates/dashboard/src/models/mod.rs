//! Domain models for the dashboard.

pub mod session;

pub use session::{AuthSession, LOGGED_IN_COOKIE, StoredAuth, session_keys};
