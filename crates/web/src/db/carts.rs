//! Cart repository for database operations.
//!
//! Cart creation and line-item insertion are single atomic upserts backed
//! by uniqueness constraints (`carts.user_id`, `cart_items (cart_id,
//! product_id)`), so concurrent add-to-cart requests cannot produce
//! duplicate carts or duplicate lines.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use marketstall_core::{CartId, CartItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Cart, CartLine};

/// Raw `carts` row.
#[derive(sqlx::FromRow)]
struct CartRow {
    id: i32,
    user_id: i32,
    created_at: DateTime<Utc>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self {
            id: CartId::new(row.id),
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
        }
    }
}

/// Raw line-item row joined with product data.
#[derive(sqlx::FromRow)]
struct CartLineRow {
    item_id: i32,
    product_id: i32,
    product_name: String,
    unit_price: Decimal,
    quantity: i32,
}

impl CartLineRow {
    fn into_domain(self) -> Result<CartLine, RepositoryError> {
        let unit_price = Price::new(self.unit_price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price in database: {e}"))
        })?;

        Ok(CartLine {
            item_id: CartItemId::new(self.item_id),
            product_id: ProductId::new(self.product_id),
            product_name: self.product_name,
            unit_price,
            quantity: self.quantity,
        })
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get the user's cart, creating it if it doesn't exist yet.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict, so this is one round trip either way.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO carts (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at
            ",
        )
        .bind(user_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Add one unit of a product to a cart.
    ///
    /// Inserts a line with quantity 1, or increments the existing line for
    /// the same product. Returns the resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails (including
    /// a foreign-key violation for a product deleted concurrently).
    pub async fn add_product(
        &self,
        cart_id: CartId,
        product_id: ProductId,
    ) -> Result<i32, RepositoryError> {
        let (quantity,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO cart_items (cart_id, product_id, quantity)
            VALUES ($1, $2, 1)
            ON CONFLICT (cart_id, product_id)
            DO UPDATE SET quantity = cart_items.quantity + 1
            RETURNING quantity
            ",
        )
        .bind(cart_id.as_i32())
        .bind(product_id.as_i32())
        .fetch_one(self.pool)
        .await?;

        Ok(quantity)
    }

    /// Get all line items for a user's cart, joined with product data.
    ///
    /// Returns an empty vector when the user has no cart yet.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn lines_for_user(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r"
            SELECT ci.id AS item_id,
                   p.id AS product_id,
                   p.name AS product_name,
                   p.price AS unit_price,
                   ci.quantity
            FROM cart_items ci
            JOIN carts c ON ci.cart_id = c.id
            JOIN products p ON ci.product_id = p.id
            WHERE c.user_id = $1
            ORDER BY ci.id ASC
            ",
        )
        .bind(user_id.as_i32())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartLineRow::into_domain).collect()
    }
}
