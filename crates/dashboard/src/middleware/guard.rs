//! Route guard middleware.
//!
//! Evaluated once per navigation, before any handler runs. The guard is a
//! pure decision function of the `logged_in` cookie and the requested path:
//! it never touches the durable session store (it runs in front of it by
//! design) and keeps no state between requests.
//!
//! | cookie | path class | action |
//! |--------|------------|--------|
//! | false  | protected  | redirect to `/login` |
//! | false  | public     | allow |
//! | true   | protected  | allow |
//! | true   | public     | redirect to `/` |
//!
//! API and asset prefixes are exempt from the guard entirely.

use axum::{
    extract::Request,
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::models::LOGGED_IN_COOKIE;

/// Where unauthenticated navigations are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where authenticated users are sent away from auth screens.
pub const HOME_PATH: &str = "/";

/// Pages reachable without a login.
const PUBLIC_PATHS: &[&str] = &["/login", "/register", "/forgot-password"];

/// Prefixes the guard never evaluates: API calls and static assets.
const EXEMPT_PREFIXES: &[&str] = &["/api/", "/static/", "/images/"];

/// Exact paths the guard never evaluates.
const EXEMPT_PATHS: &[&str] = &["/health", "/health/ready", "/favicon.ico"];

/// How the guard classifies a requested path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Auth screens: login, register, forgot-password.
    Public,
    /// Everything behind a login.
    Protected,
    /// Outside the guard's matcher.
    Exempt,
}

/// The guard's verdict for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

/// Classify a path. Public paths match exactly (with or without a trailing
/// slash); anything not public or exempt is protected.
#[must_use]
pub fn classify(path: &str) -> PathClass {
    if EXEMPT_PATHS.contains(&path) || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return PathClass::Exempt;
    }

    let normalized = if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    };
    if PUBLIC_PATHS.contains(&normalized) {
        return PathClass::Public;
    }

    PathClass::Protected
}

/// The pure guard decision: (cookie, path) -> action.
#[must_use]
pub fn decide(logged_in: bool, path: &str) -> GuardAction {
    match (logged_in, classify(path)) {
        (_, PathClass::Exempt)
        | (false, PathClass::Public)
        | (true, PathClass::Protected) => GuardAction::Allow,
        (false, PathClass::Protected) => GuardAction::RedirectToLogin,
        (true, PathClass::Public) => GuardAction::RedirectToHome,
    }
}

/// Read the `logged_in` boolean cookie from request headers.
///
/// Only the literal value `true` counts as logged in; an absent cookie, an
/// expired-and-resent `false`, or any other value reads as logged out.
#[must_use]
pub fn logged_in_from_headers(headers: &HeaderMap) -> bool {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == LOGGED_IN_COOKIE && value == "true")
}

/// The guard middleware. Runs before the session layer is ever consulted.
pub async fn route_guard(request: Request, next: Next) -> Response {
    let path = request.uri().path();
    let logged_in = logged_in_from_headers(request.headers());

    match decide(logged_in, path) {
        GuardAction::Allow => next.run(request).await,
        GuardAction::RedirectToLogin => {
            tracing::debug!(path, "unauthenticated navigation, redirecting to login");
            Redirect::to(LOGIN_PATH).into_response()
        }
        GuardAction::RedirectToHome => {
            tracing::debug!(path, "authenticated navigation to auth screen, redirecting home");
            Redirect::to(HOME_PATH).into_response()
        }
    }
}
