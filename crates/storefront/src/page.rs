//! The product page as the template renders it.
//!
//! The template emits a JSON blob describing the product (the same data it
//! writes into `data-*` attributes) together with which interactive regions
//! it actually rendered. The controller is built from this description and
//! never inspects markup itself.

use maison_core::{CurrencyCode, Price, ProductId, SizeCode, Stock};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Product-level configuration injected by the template.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConfig {
    pub product_id: ProductId,
    /// Unit price in `currency`.
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: CurrencyCode,
    /// Stock across all sizes; bounds the quantity until a size is chosen.
    #[serde(default)]
    pub total_stock: i64,
}

const fn default_currency() -> CurrencyCode {
    CurrencyCode::EUR
}

impl ProductConfig {
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::new(self.price, self.currency)
    }

    #[must_use]
    pub fn total_stock(&self) -> Stock {
        Stock::from_raw(self.total_stock)
    }
}

/// One size control (`.size-option` with `data-size` / `data-stock`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SizeOption {
    pub size: SizeCode,
    /// Raw stock as written by the template; may be negative.
    #[serde(default)]
    pub stock: i64,
    /// `false` for controls rendered with the `unavailable` class.
    #[serde(default = "default_available")]
    pub available: bool,
}

const fn default_available() -> bool {
    true
}

impl SizeOption {
    #[must_use]
    pub fn new(size: SizeCode, stock: i64) -> Self {
        Self {
            size,
            stock,
            available: true,
        }
    }

    #[must_use]
    pub fn stock(&self) -> Stock {
        Stock::from_raw(self.stock)
    }
}

/// Which interactive elements exist on this page variant.
///
/// Operations aimed at an absent region do nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct Regions {
    pub size_selector: bool,
    pub quantity_input: bool,
    pub stock_info: bool,
    pub cart_button: bool,
    pub wishlist_button: bool,
    pub gallery: bool,
}

impl Default for Regions {
    fn default() -> Self {
        Self {
            size_selector: true,
            quantity_input: true,
            stock_info: true,
            cart_button: true,
            wishlist_button: true,
            gallery: true,
        }
    }
}

/// Everything the controller needs to know about one rendered product page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub config: ProductConfig,
    #[serde(default)]
    pub sizes: Vec<SizeOption>,
    /// Gallery image URLs; the first one is shown initially.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub regions: Regions,
}

impl ProductPage {
    /// A page with every region present and no sizes or images.
    #[must_use]
    pub fn new(config: ProductConfig) -> Self {
        Self {
            config,
            sizes: Vec::new(),
            images: Vec::new(),
            regions: Regions::default(),
        }
    }

    /// Parse the JSON blob emitted by the product template.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a size code is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn with_sizes(mut self, sizes: Vec<SizeOption>) -> Self {
        self.sizes = sizes;
        self
    }

    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    #[must_use]
    pub const fn with_regions(mut self, regions: Regions) -> Self {
        self.regions = regions;
        self
    }
}
