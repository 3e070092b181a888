//! Cart domain types.

use chrono::{DateTime, Utc};

use marketstall_core::{CartId, CartItemId, Price, ProductId, UserId};

/// A user's cart.
///
/// Created lazily on the first add-to-cart action; there is at most one
/// cart per user (enforced by a uniqueness constraint).
#[derive(Debug, Clone)]
pub struct Cart {
    /// Unique cart ID.
    pub id: CartId,
    /// Owning user.
    pub user_id: UserId,
    /// When the cart was created.
    pub created_at: DateTime<Utc>,
}

/// A cart line item joined with its product.
///
/// At most one line exists per `(cart, product)` pair; adding the same
/// product again increments `quantity` instead of creating a new line.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// The line item's ID.
    pub item_id: CartItemId,
    /// The referenced product.
    pub product_id: ProductId,
    /// Product name at display time.
    pub product_name: String,
    /// Unit price of the product.
    pub unit_price: Price,
    /// How many units are in the cart (always positive).
    pub quantity: i32,
}
