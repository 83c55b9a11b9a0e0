//! `reqwest` implementation of [`WishlistService`].

use std::sync::Arc;

use async_trait::async_trait;
use maison_core::ProductId;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::{WishlistReply, WishlistService, WishlistStatus};
use crate::config::{StorefrontConfig, WishlistEndpoints};
use crate::error::WishlistError;

/// Form field carrying the anti-forgery token.
const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// Header carrying the anti-forgery token.
const CSRF_HEADER: &str = "X-CSRFToken";

/// HTTP client for the wishlist endpoints.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpWishlistClient {
    inner: Arc<HttpWishlistClientInner>,
}

struct HttpWishlistClientInner {
    client: reqwest::Client,
    endpoints: WishlistEndpoints,
    csrf_token: SecretString,
}

impl std::fmt::Debug for HttpWishlistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpWishlistClient")
            .field("endpoints", &self.inner.endpoints)
            .field("csrf_token", &"[REDACTED]")
            .finish()
    }
}

impl HttpWishlistClient {
    /// Create a new wishlist client.
    ///
    /// `csrf_token` is the page's anti-forgery token; it is sent with every
    /// mutating request.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &StorefrontConfig, csrf_token: SecretString) -> Result<Self, WishlistError> {
        HeaderValue::from_str(csrf_token.expose_secret())
            .map_err(|e| WishlistError::Parse(format!("Invalid CSRF token format: {e}")))?;

        let mut headers = HeaderMap::new();
        // Marks the request as AJAX so the backend answers with JSON.
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpWishlistClientInner {
                client,
                endpoints: config.wishlist.clone(),
                csrf_token,
            }),
        })
    }

    /// Endpoints this client talks to.
    #[must_use]
    pub fn endpoints(&self) -> &WishlistEndpoints {
        &self.inner.endpoints
    }

    /// POST a form-encoded mutation.
    async fn mutate(&self, url: &Url, product_id: ProductId) -> Result<WishlistReply, WishlistError> {
        let token = self.inner.csrf_token.expose_secret();
        let form = [
            ("product_id", product_id.to_string()),
            (CSRF_FIELD, token.to_string()),
        ];

        let response = self
            .inner
            .client
            .post(url.clone())
            .header(CSRF_HEADER, token)
            .form(&form)
            .send()
            .await?;

        read_json(response).await
    }
}

#[async_trait]
impl WishlistService for HttpWishlistClient {
    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn status(&self, product_id: ProductId) -> Result<bool, WishlistError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoints.status.clone())
            .query(&[("product_id", product_id.to_string())])
            .send()
            .await?;

        let status: WishlistStatus = read_json(response).await?;
        debug!(in_wishlist = status.in_wishlist, "Wishlist status fetched");
        Ok(status.in_wishlist)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError> {
        self.mutate(&self.inner.endpoints.add, product_id).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn remove(&self, product_id: ProductId) -> Result<WishlistReply, WishlistError> {
        self.mutate(&self.inner.endpoints.remove, product_id).await
    }
}

/// Check the status code and decode a JSON body.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WishlistError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(WishlistError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| WishlistError::Parse(e.to_string()))
}
