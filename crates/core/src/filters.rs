//! Catalog filtering.

use serde::{Deserialize, Serialize};

use crate::product::{Catalog, Product};
use crate::types::{CategoryFilter, MinRating, PriceRange};

/// The three predicates narrowing the displayed catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    pub category: CategoryFilter,
    pub price_range: PriceRange,
    pub min_rating: MinRating,
}

impl Filters {
    /// Whether `product` passes every active predicate.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category.admits(&product.category)
            && self.price_range.contains(product.price)
            && self.min_rating.admits(product.rating)
    }

    /// Products passing the filters, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        catalog.iter().filter(|p| self.matches(p)).collect()
    }

    /// Whether any predicate differs from the defaults.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self != Self::default()
    }
}
