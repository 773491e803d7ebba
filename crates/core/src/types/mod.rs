//! Core types for Corner Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod price;
pub mod rating;

pub use category::{ALL_CATEGORIES, Category, CategoryFilter};
pub use id::*;
pub use price::{NegativePriceError, Price, PriceRange};
pub use rating::{InvalidRatingError, MAX_STARS, MinRating, Rating};
