//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use marketstall_core::{Price, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::routes::home::ProductView;
use crate::state::AppState;

/// New product form data.
#[derive(Debug, Deserialize)]
pub struct AddProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductTemplate {
    pub product: ProductView,
    pub current_username: Option<String>,
}

/// Display a single product.
///
/// Returns 404 when the product does not exist.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Path(id): Path<i32>,
) -> Result<ProductTemplate> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductTemplate {
        product: ProductView::from(&product),
        current_username: auth.map(|user| user.username.to_string()),
    })
}

/// Handle new product form submission.
///
/// Validation failures redirect back to the home page with an error code
/// rather than rendering an error page.
#[instrument(skip(state, form), fields(user_id = user.id.as_i32()))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddProductForm>,
) -> Result<Response> {
    let name = form.name.trim();
    let description = form.description.trim();

    if name.is_empty() || description.is_empty() {
        return Ok(Redirect::to("/?error=product_fields").into_response());
    }

    let Ok(price) = Price::parse(form.price.trim()) else {
        return Ok(Redirect::to("/?error=product_price").into_response());
    };

    let repo = ProductRepository::new(state.pool());
    let product = repo.create(name, description, price).await?;

    tracing::info!(product_id = product.id.as_i32(), "Product created");
    Ok(Redirect::to("/?success=product_added").into_response())
}
