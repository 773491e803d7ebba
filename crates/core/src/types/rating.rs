//! Customer ratings and the minimum-rating filter threshold.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest possible rating.
pub const MAX_STARS: u8 = 5;

/// Error returned for a rating outside `0.0..=5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("rating must be between 0 and 5 (got {0})")]
pub struct InvalidRatingError(pub f64);

/// A product rating between 0.0 and 5.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Rating(f64);

impl Rating {
    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRatingError`] for NaN, infinities and values outside
    /// `0.0..=5.0`.
    pub fn new(value: f64) -> Result<Self, InvalidRatingError> {
        if value.is_finite() && (0.0..=f64::from(MAX_STARS)).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidRatingError(value))
        }
    }

    /// The raw rating value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Number of filled stars when rendering: the rating rounded to the
    /// nearest whole star, halves rounding up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // bounded to 0..=5
    pub fn filled_stars(&self) -> u8 {
        self.0.round() as u8
    }
}

impl TryFrom<f64> for Rating {
    type Error = InvalidRatingError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for f64 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// Minimum rating a product needs to stay visible. Zero disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct MinRating(u8);

impl From<u8> for MinRating {
    fn from(stars: u8) -> Self {
        Self::new(stars)
    }
}

impl From<MinRating> for u8 {
    fn from(rating: MinRating) -> Self {
        rating.0
    }
}

impl MinRating {
    /// The unfiltered threshold.
    pub const ANY: Self = Self(0);

    /// Create a threshold, clamping to `0..=5`.
    #[must_use]
    pub fn new(stars: u8) -> Self {
        Self(stars.min(MAX_STARS))
    }

    /// Threshold in whole stars.
    #[must_use]
    pub const fn stars(&self) -> u8 {
        self.0
    }

    /// Whether the filter is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.0 > 0
    }

    /// Whether a product with `rating` passes this threshold.
    #[must_use]
    pub fn admits(&self, rating: Rating) -> bool {
        !self.is_active() || rating.value() >= f64::from(self.0)
    }
}
