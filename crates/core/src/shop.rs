//! The storefront state reducer.
//!
//! Every change to the catalog, the cart or the filters goes through
//! [`apply`], which takes the current [`ShopState`] and one [`ShopAction`]
//! and returns the next state. The reducer is synchronous and total: there
//! is no action that can fail, and actions referring to products that are
//! not in the cart leave the state untouched.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::filters::Filters;
use crate::product::{Catalog, Product};
use crate::types::{CategoryFilter, MinRating, Price, PriceRange, ProductId};

/// Everything a storefront page renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShopState {
    /// Shared with every other state built from the same load.
    pub catalog: Arc<Catalog>,
    pub cart: Cart,
    pub filters: Filters,
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShopAction {
    /// Replace the catalog.
    SetProducts(Arc<Catalog>),
    /// Add one unit of a product.
    AddToCart { product_id: ProductId },
    /// Drop a product's cart line.
    RemoveFromCart { product_id: ProductId },
    /// Set a line's quantity; below one removes it.
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    SetCategory(CategoryFilter),
    SetPriceRange(PriceRange),
    SetRating(MinRating),
    /// Reset every filter to its default.
    ClearFilters,
}

/// Compute the state that follows `action`.
#[must_use]
pub fn apply(mut state: ShopState, action: ShopAction) -> ShopState {
    state.dispatch(action);
    state
}

impl ShopState {
    /// A state with the given catalog, an empty cart and default filters.
    #[must_use]
    pub fn with_catalog(catalog: impl Into<Arc<Catalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            ..Self::default()
        }
    }

    /// Apply `action` in place.
    pub fn dispatch(&mut self, action: ShopAction) {
        match action {
            ShopAction::SetProducts(catalog) => self.catalog = catalog,
            ShopAction::AddToCart { product_id } => self.cart.add(product_id),
            ShopAction::RemoveFromCart { product_id } => {
                self.cart.remove(product_id);
            }
            ShopAction::UpdateQuantity {
                product_id,
                quantity,
            } => self.cart.set_quantity(product_id, quantity),
            ShopAction::SetCategory(category) => self.filters.category = category,
            ShopAction::SetPriceRange(range) => self.filters.price_range = range,
            ShopAction::SetRating(rating) => self.filters.min_rating = rating,
            ShopAction::ClearFilters => self.filters = Filters::default(),
        }
    }

    /// Total units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Cart subtotal priced against the current catalog.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.subtotal(&self.catalog)
    }

    /// Catalog products passing the current filters, in catalog order.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        self.filters.apply(&self.catalog)
    }
}
