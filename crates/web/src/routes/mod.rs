//! HTTP route handlers for the shop.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                           - Home page (product listing)
//! GET  /health                     - Health check
//! GET  /health/ready               - Readiness check (database ping)
//!
//! # Products
//! GET  /product/{id}               - Product detail
//! POST /add_product                - Create product (requires auth)
//!
//! # Cart (requires auth)
//! GET  /add_to_cart/{product_id}   - Add one unit of a product
//! GET  /cart                       - Cart page
//!
//! # Auth
//! GET  /register                   - Registration page
//! POST /register                   - Register action
//! GET  /login                      - Login page
//! POST /login                      - Login action
//! GET  /logout                     - Logout action
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// Query parameters for error/success display after a redirect.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Translate a flash message code from a redirect query parameter into
/// display text. Unknown codes fall back to a generic message rather
/// than echoing client input into the page.
#[must_use]
pub fn flash_message(code: &str) -> &'static str {
    match code {
        "credentials" => "Invalid username or password.",
        "username_taken" => "That username is already taken.",
        "username_invalid" => "Usernames may only contain letters, digits, '_', '-' and '.'.",
        "password_too_short" => "Password must be at least 8 characters long.",
        "password_mismatch" => "Passwords do not match.",
        "session" => "Something went wrong with your session. Please try again.",
        "product_fields" => "Product name and description are required.",
        "product_price" => "Price must be a non-negative amount.",
        "registered" => "Account created. You can now log in.",
        "product_added" => "Product created.",
        _ => "Something went wrong. Please try again.",
    }
}

/// Create all routes for the shop.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::index))
        // Product routes
        .route("/product/{id}", get(products::show))
        .route("/add_product", post(products::create))
        // Cart routes
        .route("/add_to_cart/{product_id}", get(cart::add))
        .route("/cart", get(cart::show))
        // Auth routes
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_message_known_codes() {
        assert_eq!(flash_message("credentials"), "Invalid username or password.");
        assert_eq!(
            flash_message("registered"),
            "Account created. You can now log in."
        );
    }

    #[test]
    fn test_flash_message_unknown_code_not_echoed() {
        let message = flash_message("<script>alert(1)</script>");
        assert!(!message.contains("script"));
    }
}
