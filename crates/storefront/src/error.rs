//! Error types and Sentry helpers.
//!
//! Nothing on the product page is fatal: these errors are logged, reported
//! and turned into notifications by the controller, never propagated to the
//! shopper as a broken page.

use thiserror::Error;

/// Errors that can occur when talking to the wishlist endpoints.
#[derive(Debug, Error)]
pub enum WishlistError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WishlistError {
    /// Whether the failure happened before any answer came back.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Rendering a view into HTML failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Report an unexpected failure to Sentry and the log.
pub fn report_error<E>(context: &str, err: &E)
where
    E: std::error::Error + 'static,
{
    let event_id = sentry::capture_error(err);
    tracing::warn!(
        error = %err,
        sentry_event_id = %event_id,
        "{context}"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("product_page", "Selected size", Some(&[("size", "M")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
