//! Product domain types.

use chrono::{DateTime, Utc};

use marketstall_core::{Price, ProductId};

/// A sellable item in the catalog.
///
/// Products are created by any logged-in user and never updated or
/// deleted afterwards.
#[derive(Debug, Clone)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Non-negative decimal price.
    pub price: Price,
    /// When the product was listed.
    pub created_at: DateTime<Utc>,
}
