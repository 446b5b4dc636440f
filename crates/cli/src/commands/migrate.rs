//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the dashboard session-store schema
//! tp-cli migrate dashboard
//! ```
//!
//! # Environment Variables
//!
//! - `DASHBOARD_DATABASE_URL` - `PostgreSQL` connection string (falls back
//!   to `DATABASE_URL`)

use sqlx::PgPool;
use tower_sessions_sqlx_store::PostgresStore;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Create the dashboard session-store schema.
///
/// The dashboard keeps no business data locally; the only table is the
/// tower-sessions store holding the durable auth records.
///
/// # Errors
///
/// Returns an error if the database URL is missing or the schema cannot be
/// created.
pub async fn dashboard() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DASHBOARD_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("DASHBOARD_DATABASE_URL"))?;

    tracing::info!("Connecting to dashboard database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Creating session-store schema...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Dashboard migrations complete!");
    Ok(())
}
