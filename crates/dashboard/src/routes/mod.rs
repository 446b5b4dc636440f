//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Dashboard home
//! GET  /health                 - Liveness check (exempt from the guard)
//! GET  /health/ready           - Readiness check (exempt from the guard)
//!
//! # Auth (public paths)
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /register               - Register page
//! POST /register               - Register action
//! GET  /forgot-password        - Forgot password page
//! POST /forgot-password        - Forgot password action
//! POST /logout                 - Logout action
//!
//! # Master data (requires auth via route guard)
//! GET  /categories/{id}        - Category detail
//! GET  /customers/{id}         - Customer detail
//! GET  /suppliers/{id}         - Supplier detail
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod home;
pub mod suppliers;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/register", get(auth::register_page).post(auth::register))
        .route(
            "/forgot-password",
            get(auth::forgot_password_page).post(auth::forgot_password),
        )
        .route("/logout", post(auth::logout))
}

/// Create the master-data routes router.
pub fn masterdata_routes() -> Router<AppState> {
    Router::new()
        .route("/categories/{id}", get(categories::show))
        .route("/customers/{id}", get(customers::show))
        .route("/suppliers/{id}", get(suppliers::show))
}

/// Create all routes for the dashboard.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Master data detail pages
        .merge(masterdata_routes())
        // Auth pages and actions
        .merge(auth_routes())
}
