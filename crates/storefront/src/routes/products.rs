//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use corner_shop_core::ProductId;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::load_cart;
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::home::ViewMode;
use crate::routes::views::ProductView;
use crate::state::AppState;

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    /// Other products in the same category.
    pub related: Vec<ProductView>,
    /// Layout used by the shared product card partial.
    pub view: &'static str,
    pub return_to: String,
    pub cart_count: u32,
}

/// Number of related products shown under the detail view.
const RELATED_LIMIT: usize = 3;

/// Display product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let cart = load_cart(&session, catalog).await;

    let related = catalog
        .iter()
        .filter(|p| p.id != product.id && p.category == product.category)
        .take(RELATED_LIMIT)
        .map(|p| ProductView::new(p, &cart))
        .collect();

    Ok(ProductShowTemplate {
        product: ProductView::new(product, &cart),
        related,
        view: ViewMode::Grid.as_str(),
        return_to: format!("/products/{id}"),
        cart_count: cart.item_count(),
    })
}
