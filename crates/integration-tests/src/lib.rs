//! Integration tests for Tillpoint.
//!
//! # Running Tests
//!
//! ```bash
//! # Create the session-store schema
//! cargo run -p tillpoint-cli -- migrate dashboard
//!
//! # Start the dashboard
//! cargo run -p tillpoint-dashboard
//!
//! # Run integration tests
//! cargo test -p tillpoint-integration-tests -- --ignored
//! ```
//!
//! # Environment
//!
//! - `DASHBOARD_BASE_URL` - where the dashboard listens (default
//!   `http://localhost:3000`)
//! - `TEST_LOGIN_EMAIL` / `TEST_LOGIN_PASSWORD` - credentials the backend
//!   accepts, for the login-flow tests
