//! Database operations for the dashboard `PostgreSQL`.
//!
//! # Database: `tp_dashboard`
//!
//! The Tillpoint API is the source of truth for all business data; the only
//! local table is session storage:
//!
//! ## Tables
//!
//! - `sessions` - Tower-sessions storage (durable auth record per browser)
//!
//! # Migrations
//!
//! The session schema is created via:
//! ```bash
//! cargo run -p tillpoint-cli -- migrate dashboard
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
