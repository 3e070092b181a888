//! Integration tests for registration, login, and logout.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied (ms-cli migrate)
//! - The shop server running (cargo run -p marketstall-web)
//!
//! Run with: cargo test -p marketstall-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};
use uuid::Uuid;

/// Base URL for the shop (configurable via environment).
fn base_url() -> String {
    std::env::var("MARKETSTALL_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create a client with a cookie store and redirects disabled, so tests
/// can assert on individual redirect responses.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Generate a unique username for this test run.
fn unique_username() -> String {
    format!("it-{}", Uuid::new_v4().simple())
}

/// Test helper: register a user via the form endpoint.
async fn register(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("username", username),
            ("password", password),
            ("password_confirm", password),
        ])
        .send()
        .await
        .expect("Failed to register")
}

/// Test helper: log in via the form endpoint.
async fn login(client: &Client, username: &str, password: &str) -> reqwest::Response {
    client
        .post(format!("{}/login", base_url()))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .expect("Failed to log in")
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_register_then_login_roundtrip() {
    let client = client();
    let username = unique_username();

    // Registration redirects to the login page with a success flash
    let resp = register(&client, &username, "hunter2hunter2").await;
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.starts_with("/login"), "got location {location}");
    assert!(location.contains("success"));

    // Login redirects home and sets a session cookie
    let resp = login(&client, &username, "hunter2hunter2").await;
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers().get("location").unwrap(), "/");

    // The home page now greets the user
    let resp = client
        .get(format!("{}/", base_url()))
        .send()
        .await
        .expect("Failed to load home page");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains(&username));
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_login_wrong_password_is_generic_failure() {
    let client = client();
    let username = unique_username();

    register(&client, &username, "hunter2hunter2").await;

    let resp = login(&client, &username, "not-the-password").await;
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login?error=credentials");
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_login_unknown_user_same_failure_as_wrong_password() {
    let client = client();

    // A username that has never been registered
    let resp = login(&client, &unique_username(), "whatever-password").await;
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/login?error=credentials");
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_register_duplicate_username_rejected() {
    let client = client();
    let username = unique_username();

    register(&client, &username, "hunter2hunter2").await;

    let resp = register(&client, &username, "otherpassword1").await;
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("username_taken"), "got {location}");
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_register_short_password_rejected() {
    let client = client();

    let resp = register(&client, &unique_username(), "short").await;
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("password_too_short"), "got {location}");
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_register_password_mismatch_rejected() {
    let client = client();

    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[
            ("username", unique_username().as_str()),
            ("password", "hunter2hunter2"),
            ("password_confirm", "hunter2hunter3"),
        ])
        .send()
        .await
        .expect("Failed to register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("password_mismatch"), "got {location}");
}

#[tokio::test]
#[ignore = "Requires running shop server and database"]
async fn test_logout_ends_session() {
    let client = client();
    let username = unique_username();

    register(&client, &username, "hunter2hunter2").await;
    login(&client, &username, "hunter2hunter2").await;

    // Logout redirects home
    let resp = client
        .get(format!("{}/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers().get("location").unwrap(), "/");

    // Cart now requires login again
    let resp = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to request cart");
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers().get("location").unwrap(), "/login");
}
