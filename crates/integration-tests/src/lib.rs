//! Integration tests for Marketstall.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! ms-cli migrate
//!
//! # Start the server
//! cargo run -p marketstall-web
//!
//! # Run integration tests
//! cargo test -p marketstall-integration-tests -- --ignored
//! ```
//!
//! The tests live in `tests/` and talk to a running server over HTTP with
//! `reqwest`. They are `#[ignore]`d by default so `cargo test` stays green
//! without external services.
