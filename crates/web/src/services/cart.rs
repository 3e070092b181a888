//! Cart service.
//!
//! Wraps the cart and product repositories so the add-to-cart flow has an
//! explicit not-found condition instead of silently swallowing unknown
//! product IDs.

use sqlx::PgPool;
use thiserror::Error;

use marketstall_core::{ProductId, UserId};

use crate::db::{CartRepository, ProductRepository, RepositoryError};
use crate::models::CartLine;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart service.
pub struct CartService<'a> {
    products: ProductRepository<'a>,
    carts: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            products: ProductRepository::new(pool),
            carts: CartRepository::new(pool),
        }
    }

    /// Add one unit of a product to the user's cart.
    ///
    /// Creates the cart on first use, then inserts or increments the line
    /// item for this product. Returns the line's resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product does not exist;
    /// the cart is left untouched in that case.
    pub async fn add_to_cart(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<i32, CartError> {
        if self.products.get(product_id).await?.is_none() {
            return Err(CartError::ProductNotFound);
        }

        let cart = self.carts.get_or_create(user_id).await?;
        let quantity = self.carts.add_product(cart.id, product_id).await?;

        Ok(quantity)
    }

    /// Get the user's cart contents.
    ///
    /// Returns an empty vector when the user has no cart yet; that is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the database query fails.
    pub async fn view_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, CartError> {
        let lines = self.carts.lines_for_user(user_id).await?;
        Ok(lines)
    }
}
