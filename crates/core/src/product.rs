//! Catalog entries.
//!
//! The catalog is loaded once at startup and never mutated afterwards, so
//! [`Catalog`] validates its products up front and hands out shared
//! references from then on.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Category, Price, ProductId, Rating};

/// A product offered in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    /// Image URI.
    pub image: String,
    pub rating: Rating,
}

/// Errors raised while building a [`Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The validated, immutable product list in display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking that ids are unique and names non-empty.
    ///
    /// Price and rating bounds are enforced by their types.
    ///
    /// # Errors
    ///
    /// Returns the first [`CatalogError`] found.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.name.trim().is_empty() {
                return Err(CatalogError::EmptyName(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse and validate a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] for malformed input (including negative
    /// prices and out-of-range ratings) and the [`Catalog::new`] errors.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Whether a product with this id exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// All products in display order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate products in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

// Serialized as a plain product list; deserializing re-validates.
impl Serialize for Catalog {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.products().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let products = Vec::<Product>::deserialize(deserializer)?;
        Self::new(products).map_err(serde::de::Error::custom)
    }
}
