//! Integration tests for the dashboard auth flow and route guard.
//!
//! These tests require:
//! - A running `PostgreSQL` database with the session schema
//!   (tp-cli migrate dashboard)
//! - The dashboard running (cargo run -p tillpoint-dashboard)
//! - A reachable Tillpoint API with the `TEST_LOGIN_*` account
//!
//! Run with: cargo test -p tillpoint-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};

use tillpoint_dashboard::models::LOGGED_IN_COOKIE;

/// Base URL for the dashboard (configurable via environment).
fn dashboard_base_url() -> String {
    std::env::var("DASHBOARD_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Client that keeps cookies but does not follow redirects, so guard and
/// login behavior can be asserted from the raw responses.
fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Test credentials the backend accepts.
fn test_credentials() -> (String, String) {
    let email = std::env::var("TEST_LOGIN_EMAIL").unwrap_or_else(|_| "a@b.com".to_string());
    let password = std::env::var("TEST_LOGIN_PASSWORD").unwrap_or_else(|_| "secret".to_string());
    (email, password)
}

/// Test helper: log in and assert the redirect + cookie contract.
async fn login(client: &Client) {
    let base_url = dashboard_base_url();
    let (email, password) = test_credentials();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to post login form");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/");

    // The logged_in cookie must be stamped alongside the session cookie
    let cookies: Vec<_> = resp
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with(&format!("{LOGGED_IN_COOKIE}=true"))),
        "login must set {LOGGED_IN_COOKIE}=true, got {cookies:?}"
    );
}

// ============================================================================
// Route Guard Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_guard_redirects_unauthenticated_from_protected() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/login");
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_guard_allows_unauthenticated_on_public() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    for path in ["/login", "/register", "/forgot-password"] {
        let resp = client
            .get(format!("{base_url}{path}"))
            .send()
            .await
            .expect("Failed to get public page");
        assert_eq!(resp.status(), StatusCode::OK, "expected 200 for {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_guard_redirects_authenticated_from_public() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    login(&client).await;

    let resp = client
        .get(format!("{base_url}/register"))
        .send()
        .await
        .expect("Failed to get register page");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/");
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_guard_exempts_health_endpoints() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Login / Logout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_login_then_home_is_allowed() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    login(&client).await;

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    let (email, _) = test_credentials();
    assert!(body.contains(&email), "home page shows the signed-in email");
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_login_with_bad_credentials_stays_logged_out() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", "a@b.com"), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to post login form");

    // Back to the form with a message, never to the dashboard
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/login?error="));

    // And the guard still treats the session as logged out
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_login_with_missing_password_is_rejected_locally() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .post(format!("{base_url}/login"))
        .form(&[("email", "a@b.com"), ("password", "")])
        .send()
        .await
        .expect("Failed to post login form");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/login?error="));
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_logout_clears_session_and_cookie() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    login(&client).await;

    let resp = client
        .post(format!("{base_url}/logout"))
        .send()
        .await
        .expect("Failed to post logout");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/login");

    let cookies: Vec<_> = resp
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(
        cookies.iter().any(|c| {
            c.starts_with(&format!("{LOGGED_IN_COOKIE}=false")) && c.contains("Max-Age=0")
        }),
        "logout must expire the {LOGGED_IN_COOKIE} cookie, got {cookies:?}"
    );

    // Protected pages redirect again
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get home page");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_logout_is_idempotent() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    login(&client).await;

    for _ in 0..2 {
        let resp = client
            .post(format!("{base_url}/logout"))
            .send()
            .await
            .expect("Failed to post logout");
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get("location").unwrap(), "/login");
    }
}

// ============================================================================
// Registration Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_register_does_not_log_in() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("business_name", "Corner Store"),
            ("business_address", "12 Main St"),
            ("referral_code", "FRIEND"),
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("phone", "081234567890"),
            ("password", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to post register form");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    // Success or rejection, registration never lands on the dashboard
    assert!(location.starts_with("/login?success=") || location.starts_with("/register?error="));

    // And never sets the logged_in cookie
    let cookies: Vec<_> = resp
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert!(
        !cookies
            .iter()
            .any(|c| c.starts_with(&format!("{LOGGED_IN_COOKIE}=true"))),
        "register must not log the user in, got {cookies:?}"
    );
}

#[tokio::test]
#[ignore = "Requires running dashboard and Tillpoint API"]
async fn test_register_rejects_non_numeric_phone() {
    let client = manual_redirect_client();
    let base_url = dashboard_base_url();

    let resp = client
        .post(format!("{base_url}/register"))
        .form(&[
            ("business_name", "Corner Store"),
            ("business_address", "12 Main St"),
            ("referral_code", "FRIEND"),
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("phone", "not-a-number"),
            ("password", "hunter2hunter2"),
        ])
        .send()
        .await
        .expect("Failed to post register form");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("/register?error="));
}
