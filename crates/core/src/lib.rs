//! Maison Core - Shared domain types for the product page.
//!
//! Value types shared by the product page: product ids, prices with their
//! currency, size codes, stock levels and their shopper-facing status,
//! bounded quantities and wishlist membership.
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no HTTP
//! clients, no rendering. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, sizes, prices, stock, quantities
//!   and wishlist membership

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
