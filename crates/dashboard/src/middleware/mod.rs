//! HTTP middleware stack for the dashboard.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Route guard (cookie + path -> allow/redirect)
//! 6. Unauthorized interceptor (401 -> clear session + redirect to login)

pub mod guard;
pub mod request_id;
pub mod session;
pub mod unauthorized;

pub use guard::{GuardAction, PathClass, classify, decide, logged_in_from_headers, route_guard};
pub use request_id::request_id_middleware;
pub use session::create_session_layer;
pub use unauthorized::unauthorized_interceptor;
