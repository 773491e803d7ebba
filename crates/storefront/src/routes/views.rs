//! Display data shared by page templates.
//!
//! Templates only print strings and loop over lists, so everything that
//! needs formatting or arithmetic is computed here.

use corner_shop_core::{Cart, MAX_STARS, Product, ShopState};

/// CSS class for a filled star.
pub const STAR_FILLED: &str = "star filled";
/// CSS class for an empty star.
pub const STAR_EMPTY: &str = "star";

/// Star classes for `filled` out of five stars.
#[must_use]
pub fn star_classes(filled: u8) -> Vec<&'static str> {
    (1..=MAX_STARS)
        .map(|star| if star <= filled { STAR_FILLED } else { STAR_EMPTY })
        .collect()
}

/// Product display data for templates.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub image: String,
    pub category: String,
    pub price: String,
    pub rating: String,
    pub stars: Vec<&'static str>,
    /// Units already in the cart; zero shows the "Add to Cart" button.
    pub quantity_in_cart: u32,
    pub decrement: i64,
    pub increment: i64,
}

impl ProductView {
    #[must_use]
    pub fn new(product: &Product, cart: &Cart) -> Self {
        let quantity_in_cart = cart.quantity_of(product.id).map_or(0, |q| q.get());
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            image: product.image.clone(),
            category: product.category.to_string(),
            price: product.price.display(),
            rating: product.rating.to_string(),
            stars: star_classes(product.rating.filled_stars()),
            quantity_in_cart,
            decrement: i64::from(quantity_in_cart) - 1,
            increment: i64::from(quantity_in_cart) + 1,
        }
    }
}

/// Cart line display data for templates.
#[derive(Clone, Debug)]
pub struct CartLineView {
    pub id: i32,
    pub name: String,
    pub image: String,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
    pub decrement: i64,
    pub increment: i64,
}

/// Cart display data for templates.
#[derive(Clone, Debug)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    #[must_use]
    pub fn new(shop: &ShopState) -> Self {
        let lines = shop
            .cart
            .lines(&shop.catalog)
            .into_iter()
            .map(|line| {
                let quantity = line.quantity.get();
                CartLineView {
                    id: line.product.id.as_i32(),
                    name: line.product.name.clone(),
                    image: line.product.image.clone(),
                    unit_price: line.product.price.display(),
                    quantity,
                    line_total: line.line_total.display(),
                    decrement: i64::from(quantity) - 1,
                    increment: i64::from(quantity) + 1,
                }
            })
            .collect();

        Self {
            lines,
            subtotal: shop.cart_total().display(),
            item_count: shop.cart_item_count(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Accept a client-supplied redirect target only if it is a local path.
#[must_use]
pub fn local_path(candidate: Option<&str>, fallback: &str) -> String {
    match candidate {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}
