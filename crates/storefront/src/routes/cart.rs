//! Cart route handlers.
//!
//! Cart changes are plain form posts. Each one rehydrates the visitor's
//! cart, dispatches a single reducer action, writes the cart back and
//! redirects (`303 See Other`) to the page the form came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use corner_shop_core::{ProductId, ShopAction, ShopState};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart_store::{load_cart, save_cart};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::routes::views::{CartView, local_path};
use crate::state::AppState;

/// Query value marking the checkout notice.
pub const CHECKOUT_UNAVAILABLE: &str = "unavailable";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Update cart form data. The quantity may be zero or negative, which
/// removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
    pub return_to: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Cart page query parameters.
#[derive(Debug, Deserialize)]
pub struct CartQuery {
    pub checkout: Option<String>,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub checkout_notice: bool,
    pub return_to: &'static str,
    pub cart_count: u32,
}

/// Apply one action to the visitor's cart and persist the result.
async fn dispatch(state: &AppState, session: &Session, action: ShopAction) -> Result<ShopState> {
    let mut shop = state.shop(load_cart(session, state.catalog()).await);
    shop.dispatch(action);
    save_cart(session, &shop.cart).await?;
    Ok(shop)
}

/// Display cart page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CartQuery>,
) -> CartShowTemplate {
    let shop = state.shop(load_cart(&session, state.catalog()).await);
    let cart = CartView::new(&shop);

    CartShowTemplate {
        cart_count: cart.item_count,
        cart,
        checkout_notice: query.checkout.as_deref() == Some(CHECKOUT_UNAVAILABLE),
        return_to: "/cart",
    }
}

/// Add one unit of a product to the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    if !state.catalog().contains(form.product_id) {
        return Err(AppError::NotFound(format!("product {}", form.product_id)));
    }

    let shop = dispatch(
        &state,
        &session,
        ShopAction::AddToCart {
            product_id: form.product_id,
        },
    )
    .await?;

    let product_id = form.product_id.to_string();
    add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    tracing::info!(
        product_id = %form.product_id,
        cart_items = shop.cart_item_count(),
        "Added to cart"
    );

    Ok(Redirect::to(&local_path(form.return_to.as_deref(), "/")))
}

/// Set the quantity of a cart line.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Redirect> {
    let shop = dispatch(
        &state,
        &session,
        ShopAction::UpdateQuantity {
            product_id: form.product_id,
            quantity: form.quantity,
        },
    )
    .await?;

    tracing::info!(
        product_id = %form.product_id,
        quantity = form.quantity,
        cart_items = shop.cart_item_count(),
        "Updated cart quantity"
    );

    Ok(Redirect::to(&local_path(form.return_to.as_deref(), "/cart")))
}

/// Remove a line from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Redirect> {
    let shop = dispatch(
        &state,
        &session,
        ShopAction::RemoveFromCart {
            product_id: form.product_id,
        },
    )
    .await?;

    tracing::info!(
        product_id = %form.product_id,
        cart_items = shop.cart_item_count(),
        "Removed from cart"
    );

    Ok(Redirect::to(&local_path(form.return_to.as_deref(), "/cart")))
}

/// Checkout is not offered; send the visitor back to the cart with a notice.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Redirect {
    let cart = load_cart(&session, state.catalog()).await;
    tracing::info!(cart_items = cart.item_count(), "Checkout requested");
    Redirect::to(&format!("/cart?checkout={CHECKOUT_UNAVAILABLE}"))
}
