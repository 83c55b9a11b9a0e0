//! Maison storefront product page.
//!
//! Client-side behaviour of the product detail page as a library: size and
//! quantity selection, the add-to-cart button state machine, the wishlist
//! toggle backed by the remote wishlist endpoints, transient notifications
//! and the image gallery.
//!
//! [`controller::ProductPageController`] owns the state, [`view`] is its
//! declarative projection and [`render`] turns that into HTML fragments.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod render;
pub mod telemetry;
pub mod toast;
pub mod view;
pub mod wishlist;
