//! Unauthorized-response interceptor.
//!
//! Watches every response on the way out. Any `401 Unauthorized`, no matter
//! which handler or backend call produced it, clears the durable auth
//! record, stamps the expired `logged_in` cookie, and rewrites the response
//! into a redirect to the login page. Handlers never deal with this
//! themselves - they surface their typed error (which still reaches logs
//! and Sentry) and the interceptor owns the global reaction.

use axum::{
    extract::Request,
    http::{StatusCode, header::SET_COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::middleware::guard::LOGIN_PATH;
use crate::services::session::{clear_stored_auth, logged_out_cookie};

/// Response middleware converting 401s into a clean logout + redirect.
///
/// Must run inside the session layer so the `Session` handle is present in
/// request extensions and its writes are flushed with the response.
pub async fn unauthorized_interceptor(request: Request, next: Next) -> Response {
    // Grab the handle before the request is consumed.
    let session = request.extensions().get::<Session>().cloned();

    let response = next.run(request).await;

    if response.status() != StatusCode::UNAUTHORIZED {
        return response;
    }

    tracing::warn!("unauthorized response intercepted, clearing session");

    if let Some(session) = session {
        if let Err(e) = clear_stored_auth(&session).await {
            tracing::error!("failed to clear auth record after 401: {e}");
        }
    }

    let mut redirect = Redirect::to(LOGIN_PATH).into_response();
    if let Ok(value) = axum::http::HeaderValue::from_str(&logged_out_cookie().to_string()) {
        redirect.headers_mut().append(SET_COOKIE, value);
    }
    redirect
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        Router::new()
            .route("/ok", get(|| async { "fine" }))
            .route("/rejected", get(|| async { StatusCode::UNAUTHORIZED }))
            .layer(axum::middleware::from_fn(unauthorized_interceptor))
    }

    #[tokio::test]
    async fn test_401_becomes_login_redirect_with_expired_cookie() {
        let response = app()
            .oneshot(Request::builder().uri("/rejected").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), LOGIN_PATH);

        let cookie = response
            .headers()
            .get("set-cookie")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("logged_in=false"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_other_responses_pass_through_untouched() {
        let response = app()
            .oneshot(Request::builder().uri("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("set-cookie").is_none());
    }
}
