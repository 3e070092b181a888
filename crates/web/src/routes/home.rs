//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::models::Product;
use crate::routes::{MessageQuery, flash_message};
use crate::state::AppState;

/// Product display data for templates.
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// All products in the catalogue.
    pub products: Vec<ProductView>,
    /// Username of the logged-in user, if any.
    pub current_username: Option<String>,
    pub error: Option<&'static str>,
    pub success: Option<&'static str>,
}

/// Display the home page with the full product listing.
#[instrument(skip(state, auth, query))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<HomeTemplate> {
    let repo = ProductRepository::new(state.pool());
    let products = repo.list().await?;

    Ok(HomeTemplate {
        products: products.iter().map(ProductView::from).collect(),
        current_username: auth.map(|user| user.username.to_string()),
        error: query.error.as_deref().map(flash_message),
        success: query.success.as_deref().map(flash_message),
    })
}
