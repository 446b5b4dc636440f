//! Authentication route handlers.
//!
//! Handles login, registration, forgot-password, and logout against the
//! Tillpoint API. All session writes go through the session store, which
//! keeps the durable record and the `logged_in` cookie in step; handlers
//! here only translate outcomes into redirects and rendered forms.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::Query,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::services::session::{RegisterInput, SessionStore};

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Forgot password form data.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordForm {
    pub email: String,
}

// =============================================================================
// Query Types
// =============================================================================

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
}

/// Forgot password page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/forgot_password.html")]
pub struct ForgotPasswordTemplate {
    pub error: Option<String>,
    pub success: Option<String>,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle login form submission.
///
/// On success the store has already written the durable record; the
/// response carries the fresh `logged_in` cookie and lands on the home
/// page. On failure the user returns to the form with a displayable
/// message - validation errors never reach the network.
pub async fn login(store: SessionStore, Form(form): Form<LoginForm>) -> Response {
    match store.login(&form.email, &form.password).await {
        Ok(update) => (update, Redirect::to("/")).into_response(),
        Err(e) => {
            tracing::warn!("Login failed: {}", e);
            redirect_with_message("/login", "error", &e.user_message())
        }
    }
}

// =============================================================================
// Registration Routes
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate { error: query.error }
}

/// Handle registration form submission.
///
/// Creates the merchant account via the Tillpoint API. Registration does
/// not log the user in; they land on the login page with a confirmation.
pub async fn register(store: SessionStore, Form(form): Form<RegisterInput>) -> Response {
    match store.register(form).await {
        Ok(()) => redirect_with_message(
            "/login",
            "success",
            "Account created. You can sign in now.",
        ),
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            redirect_with_message("/register", "error", &e.user_message())
        }
    }
}

// =============================================================================
// Password Reset Routes
// =============================================================================

/// Display the forgot password page.
pub async fn forgot_password_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    ForgotPasswordTemplate {
        error: query.error,
        success: query.success,
    }
}

/// Handle forgot password form submission.
///
/// Always reports success so the form cannot be used to probe which
/// addresses have accounts.
pub async fn forgot_password(store: SessionStore, Form(form): Form<ForgotPasswordForm>) -> Response {
    if let Err(e) = store.forgot_password(&form.email).await {
        tracing::warn!("Password reset request failed: {}", e);
        // Still show success to prevent email enumeration
    }

    redirect_with_message(
        "/forgot-password",
        "success",
        "If that address has an account, a reset email is on its way.",
    )
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Clears the durable record and expires the `logged_in` cookie. Safe to
/// call when already logged out.
pub async fn logout(store: SessionStore) -> Response {
    match store.logout().await {
        Ok(update) => (update, Redirect::to("/login")).into_response(),
        Err(e) => {
            tracing::error!("Failed to clear session on logout: {}", e);
            Redirect::to("/login").into_response()
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Redirect back to a form with a displayable message in the query string.
fn redirect_with_message(path: &str, key: &str, message: &str) -> Response {
    let location = format!("{path}?{key}={}", urlencoding::encode(message));
    Redirect::to(&location).into_response()
}
