//! Corner Shop Core - Catalog, cart and filter state.
//!
//! This crate holds everything the storefront knows about products and
//! carts that does not involve I/O:
//! - [`types`] - Newtype wrappers for product IDs, prices, ratings and categories
//! - [`product`] - Catalog entries and the validated [`Catalog`]
//! - [`cart`] - Cart lines and totals
//! - [`filters`] - Catalog filtering
//! - [`shop`] - The [`ShopState`] reducer driven by [`ShopAction`]
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no HTTP, no
//! sessions, no file access. The storefront binary owns persistence and
//! rendering and calls into [`shop::apply`] for every state change.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod filters;
pub mod product;
pub mod shop;
pub mod types;

pub use cart::{Cart, CartItem, CartLine, Quantity};
pub use filters::Filters;
pub use product::{Catalog, CatalogError, Product};
pub use shop::{ShopAction, ShopState, apply};
pub use types::*;
