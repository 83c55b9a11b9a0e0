//! Integration tests for the Maison storefront.
//!
//! The tests under `tests/` drive the wishlist client and the product page
//! controller against a local `wiremock` server; no real backend is needed.
//!
//! Run with: `cargo test -p maison-integration-tests`
