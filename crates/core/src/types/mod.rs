//! Core types for the Maison product page.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod quantity;
pub mod size;
pub mod stock;
pub mod wishlist;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use quantity::Quantity;
pub use size::{SizeCode, SizeCodeError};
pub use stock::{Stock, StockStatus};
pub use wishlist::WishlistMembership;
