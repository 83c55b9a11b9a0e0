//! Remote wishlist service.
//!
//! # Endpoints
//!
//! - `GET <status>?product_id=<id>` → `{ "in_wishlist": bool }`
//! - `POST <add>` / `POST <remove>` with form fields `product_id` and
//!   `csrfmiddlewaretoken` → `{ "success": bool, "in_wishlist"?: bool, "message": str }`
//!
//! The service is the source of truth for membership; the page only caches
//! what it last heard.
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_storefront::wishlist::{HttpWishlistClient, WishlistService};
//!
//! let client = HttpWishlistClient::new(&config, csrf_token)?;
//! let saved = client.status(product_id).await?;
//! let reply = client.add(product_id).await?;
//! ```

mod client;

use std::sync::Arc;

use async_trait::async_trait;
use maison_core::ProductId;
use serde::Deserialize;

use crate::error::WishlistError;

pub use client::HttpWishlistClient;

/// Body of the status endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct WishlistStatus {
    #[serde(default)]
    pub in_wishlist: bool,
}

/// Body of the add/remove endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WishlistReply {
    /// Whether the server applied the change.
    pub success: bool,
    /// Membership after the request, when the server reports it.
    #[serde(default)]
    pub in_wishlist: Option<bool>,
    /// Shopper-facing message.
    #[serde(default)]
    pub message: String,
}

/// Operations the product page needs from the wishlist backend.
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Whether the product is currently saved.
    async fn status(&self, product_id: ProductId) -> Result<bool, WishlistError>;

    /// Save the product.
    async fn add(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError>;

    /// Remove the product.
    async fn remove(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError>;
}

#[async_trait]
impl<T> WishlistService for Arc<T>
where
    T: WishlistService + ?Sized,
{
    async fn status(&self, product_id: ProductId) -> Result<bool, WishlistError> {
        (**self).status(product_id).await
    }

    async fn add(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError> {
        (**self).add(product_id).await
    }

    async fn remove(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError> {
        (**self).remove(product_id).await
    }
}
