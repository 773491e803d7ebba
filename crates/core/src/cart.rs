//! Shopping cart lines and totals.
//!
//! A [`Cart`] keeps at most one [`CartItem`] per product, in the order the
//! products were first added. Quantities are always at least one: setting a
//! quantity of zero or less removes the line instead.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::product::{Catalog, Product};
use crate::types::{Price, ProductId};

/// A positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A quantity of one.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity, returning `None` for zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        match NonZeroU32::new(value) {
            Some(n) => Some(Self(n)),
            None => None,
        }
    }

    /// Convert a signed request value, returning `None` for anything below one.
    /// Values beyond `u32::MAX` saturate.
    #[must_use]
    pub fn from_signed(value: i64) -> Option<Self> {
        if value < 1 {
            return None;
        }
        Self::new(u32::try_from(value).unwrap_or(u32::MAX))
    }

    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// One more, saturating at `u32::MAX`.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<u32> for Quantity {
    type Error = &'static str;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("quantity must be at least 1")
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

/// One cart line: a product reference and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product id, a foreign key into the catalog.
    pub id: ProductId,
    pub quantity: Quantity,
}

/// A cart line joined with its catalog product, ready for display.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub product: &'a Product,
    pub quantity: Quantity,
    pub line_total: Price,
}

/// Ordered collection of cart lines, one per distinct product.
///
/// Only serialized directly; reading goes through [`Cart::from_json`] so
/// persisted data is normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

/// Loosely typed line as found in persisted data.
#[derive(Deserialize)]
struct StoredLine {
    id: ProductId,
    quantity: i64,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from persisted JSON.
    ///
    /// Lines with a quantity below one are dropped and repeated product ids
    /// are merged into the first occurrence, so the result always upholds
    /// the one-line-per-product invariant.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if `json` is not an array of `{id, quantity}`
    /// objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let stored: Vec<StoredLine> = serde_json::from_str(json)?;
        let mut cart = Self::new();
        for line in stored {
            let Some(quantity) = Quantity::from_signed(line.quantity) else {
                continue;
            };
            match cart.position(line.id) {
                Some(index) => {
                    if let Some(item) = cart.items.get_mut(index) {
                        let merged = item.quantity.get().saturating_add(quantity.get());
                        item.quantity = Quantity::new(merged).unwrap_or(item.quantity);
                    }
                }
                None => cart.items.push(CartItem {
                    id: line.id,
                    quantity,
                }),
            }
        }
        Ok(cart)
    }

    /// Serialize for persistence.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures, which do not occur for this type in
    /// practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Add one unit of a product, appending a new line if needed.
    pub fn add(&mut self, id: ProductId) {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => item.quantity = item.quantity.incremented(),
            None => self.items.push(CartItem {
                id,
                quantity: Quantity::ONE,
            }),
        }
    }

    /// Remove a product's line. Returns whether a line was removed.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Set a product's quantity.
    ///
    /// A quantity below one removes the line. Products not in the cart are
    /// left alone: updating never creates a line.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        match Quantity::from_signed(quantity) {
            None => {
                self.remove(id);
            }
            Some(quantity) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.quantity = quantity;
                }
            }
        }
    }

    /// Drop lines whose product is not in `catalog`. Returns how many lines
    /// were dropped.
    pub fn retain_known(&mut self, catalog: &Catalog) -> usize {
        let before = self.items.len();
        self.items.retain(|item| catalog.contains(item.id));
        before - self.items.len()
    }

    /// Quantity of a product, if it is in the cart.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> Option<Quantity> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .map(|item| item.quantity)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity.get()))
    }

    /// Lines joined with their products. Lines whose product is missing
    /// from the catalog are skipped.
    #[must_use]
    pub fn lines<'a>(&self, catalog: &'a Catalog) -> Vec<CartLine<'a>> {
        self.items
            .iter()
            .filter_map(|item| {
                catalog.get(item.id).map(|product| CartLine {
                    product,
                    quantity: item.quantity,
                    line_total: product.price * item.quantity.get(),
                })
            })
            .collect()
    }

    /// Sum of price times quantity. Unknown products contribute nothing.
    #[must_use]
    pub fn subtotal(&self, catalog: &Catalog) -> Price {
        self.lines(catalog).iter().map(|line| line.line_total).sum()
    }
}
