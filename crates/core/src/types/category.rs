//! Product category tags and the category filter selector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// A product category tag, e.g. `electronics`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The tag as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Category {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Which category the catalog is narrowed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Every category is shown.
    #[default]
    All,
    /// Only products tagged with this category are shown.
    Only(Category),
}

impl CategoryFilter {
    /// Parse a selector value. Empty input and `all` select everything.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(Category::new(value))
        }
    }

    /// Whether a product in `category` passes this filter.
    #[must_use]
    pub fn admits(&self, category: &Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }

    /// Selector value as used in query strings.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
