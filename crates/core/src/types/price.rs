//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are non-negative amounts in the store's single currency
//! (US dollars). Arithmetic stays in [`Decimal`] so that cart subtotals never
//! pick up floating point drift.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when constructing a [`Price`] from a negative amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("price must not be negative (got {0})")]
pub struct NegativePriceError(pub Decimal);

/// A non-negative amount of money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`NegativePriceError`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, NegativePriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(NegativePriceError(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from whole dollars.
    #[must_use]
    pub fn from_dollars(dollars: u32) -> Self {
        Self(Decimal::from(dollars))
    }

    /// Create a price from cents, e.g. `from_cents(1999)` is `$19.99`.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display, always with two decimal places (e.g. `$19.99`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = NegativePriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// An inclusive `[min, max]` price window used by the catalog filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PriceBounds")]
pub struct PriceRange {
    min: Price,
    max: Price,
}

/// Unordered bounds as they arrive over the wire.
#[derive(Deserialize)]
struct PriceBounds {
    min: Price,
    max: Price,
}

impl From<PriceBounds> for PriceRange {
    fn from(bounds: PriceBounds) -> Self {
        Self::new(bounds.min, bounds.max)
    }
}

impl PriceRange {
    /// Upper bound of the default (unfiltered) range.
    pub const DEFAULT_MAX_DOLLARS: u32 = 1000;

    /// Create a range. Bounds given in the wrong order are swapped.
    #[must_use]
    pub fn new(min: Price, max: Price) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn min(&self) -> Price {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub const fn max(&self) -> Price {
        self.max
    }

    /// Whether `price` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Price::ZERO,
            max: Price::from_dollars(Self::DEFAULT_MAX_DOLLARS),
        }
    }
}
