//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use tracing::instrument;

use marketstall_core::ProductId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::services::{CartError, CartService};
use crate::state::AppState;

/// A cart line prepared for display.
pub struct CartLineView {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: String,
    pub quantity: i32,
    pub line_total: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub lines: Vec<CartLineView>,
    pub total: String,
    pub current_username: Option<String>,
}

/// Build the display rows and grand total from cart lines.
///
/// All arithmetic is decimal; totals stay exact.
fn build_view(lines: &[CartLine]) -> (Vec<CartLineView>, Decimal) {
    let mut total = Decimal::ZERO;
    let views = lines
        .iter()
        .map(|line| {
            let line_total = line.unit_price.amount() * Decimal::from(line.quantity);
            total += line_total;
            CartLineView {
                product_id: line.product_id.as_i32(),
                product_name: line.product_name.clone(),
                unit_price: line.unit_price.display(),
                quantity: line.quantity,
                line_total: format!("${line_total:.2}"),
            }
        })
        .collect();
    (views, total)
}

/// Display the current user's cart.
#[instrument(skip(state), fields(user_id = user.id.as_i32()))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<CartTemplate> {
    let service = CartService::new(state.pool());
    let lines = service.view_cart(user.id).await?;

    let (views, total) = build_view(&lines);

    Ok(CartTemplate {
        lines: views,
        total: format!("${total:.2}"),
        current_username: Some(user.username.to_string()),
    })
}

/// Add one unit of a product to the current user's cart.
///
/// Always redirects back to the home page. An unknown product ID is logged
/// and ignored rather than surfaced to the client.
#[instrument(skip(state), fields(user_id = user.id.as_i32()))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(product_id): Path<i32>,
) -> Result<Response> {
    let service = CartService::new(state.pool());

    match service.add_to_cart(user.id, ProductId::new(product_id)).await {
        Ok(quantity) => {
            tracing::debug!(product_id, quantity, "Added product to cart");
        }
        Err(CartError::ProductNotFound) => {
            tracing::warn!(product_id, "Add to cart for nonexistent product");
        }
        Err(err @ CartError::Repository(_)) => return Err(AppError::Cart(err)),
    }

    Ok(Redirect::to("/").into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use marketstall_core::{CartItemId, Price};

    use super::*;

    fn line(product_id: i32, price: &str, quantity: i32) -> CartLine {
        CartLine {
            item_id: CartItemId::new(product_id),
            product_id: ProductId::new(product_id),
            product_name: format!("Product {product_id}"),
            unit_price: Price::parse(price).unwrap(),
            quantity,
        }
    }

    #[test]
    fn test_empty_cart_total() {
        let (views, total) = build_view(&[]);
        assert!(views.is_empty());
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_line_totals_multiply_quantity() {
        let (views, total) = build_view(&[line(1, "19.99", 2)]);
        assert_eq!(views[0].line_total, "$39.98");
        assert_eq!(format!("${total:.2}"), "$39.98");
    }

    #[test]
    fn test_grand_total_sums_lines() {
        let (views, total) = build_view(&[line(1, "0.10", 3), line(2, "5.00", 1)]);
        assert_eq!(views.len(), 2);
        // Decimal arithmetic keeps 0.30 + 5.00 exact
        assert_eq!(format!("${total:.2}"), "$5.30");
    }
}
