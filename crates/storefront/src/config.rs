//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_BASE_URL` - Public URL of the storefront serving the wishlist endpoints
//!
//! ## Optional
//! - `WISHLIST_STATUS_PATH` - Status endpoint path (default: /store/wishlist/check/)
//! - `WISHLIST_ADD_PATH` - Add endpoint path (default: /store/wishlist/add/)
//! - `WISHLIST_REMOVE_PATH` - Remove endpoint path (default: /store/wishlist/remove/)
//! - `WISHLIST_TIMEOUT_SECS` - Per-request timeout in seconds (default: 10)
//! - `STOREFRONT_LOG` - Tracing filter directive (default: `maison_storefront=info`)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_STATUS_PATH: &str = "/store/wishlist/check/";
pub const DEFAULT_ADD_PATH: &str = "/store/wishlist/add/";
pub const DEFAULT_REMOVE_PATH: &str = "/store/wishlist/remove/";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILTER: &str = "maison_storefront=info";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Wishlist endpoint locations
    pub wishlist: WishlistEndpoints,
    /// Timeout applied to every wishlist request
    pub request_timeout: Duration,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Absolute URLs of the three wishlist endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishlistEndpoints {
    /// `GET ?product_id=` returning `{ "in_wishlist": bool }`
    pub status: Url,
    /// `POST` adding the product
    pub add: Url,
    /// `POST` removing the product
    pub remove: Url,
}

impl WishlistEndpoints {
    /// Endpoints at their default paths under `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if a default path cannot be joined onto `base`
    /// (e.g. `base` is a `data:` URL).
    pub fn under(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            status: base.join(DEFAULT_STATUS_PATH)?,
            add: base.join(DEFAULT_ADD_PATH)?,
            remove: base.join(DEFAULT_REMOVE_PATH)?,
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base = get_required(&lookup, "STOREFRONT_BASE_URL")?;
        let base_url = Url::parse(&raw_base).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let wishlist = WishlistEndpoints {
            status: get_endpoint(&lookup, &base_url, "WISHLIST_STATUS_PATH", DEFAULT_STATUS_PATH)?,
            add: get_endpoint(&lookup, &base_url, "WISHLIST_ADD_PATH", DEFAULT_ADD_PATH)?,
            remove: get_endpoint(&lookup, &base_url, "WISHLIST_REMOVE_PATH", DEFAULT_REMOVE_PATH)?,
        };

        let timeout_secs = get_or_default(&lookup, "WISHLIST_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("WISHLIST_TIMEOUT_SECS".to_string(), e.to_string())
            })?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "WISHLIST_TIMEOUT_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            wishlist,
            request_timeout: Duration::from_secs(timeout_secs),
            log_filter: get_or_default(&lookup, "STOREFRONT_LOG", DEFAULT_LOG_FILTER),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.trim().is_empty()),
        })
    }

    /// Configuration pointing at `base_url` with every default applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the default endpoint paths cannot be joined onto
    /// `base_url`.
    pub fn with_base_url(base_url: Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            wishlist: WishlistEndpoints::under(&base_url)?,
            base_url,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            sentry_dsn: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn get_required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a variable with a default value.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

/// Resolve an endpoint path (or absolute URL) against the base URL.
fn get_endpoint<F>(lookup: &F, base: &Url, key: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let path = get_or_default(lookup, key, default);
    base.join(&path)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
