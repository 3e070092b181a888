//! User domain types.

use chrono::{DateTime, Utc};

use marketstall_core::{UserId, Username};

/// A shop user (domain type).
///
/// The Argon2id password hash is stored in a separate table and never
/// travels with this type.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across the site.
    pub username: Username,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
