//! Stock levels and their shopper-facing status.

use serde::{Deserialize, Serialize};

/// Number of units available for sale. Never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stock(u32);

impl Stock {
    /// Above this many units the stock is reported as plentiful.
    pub const LOW_THRESHOLD: u32 = 10;

    /// Create a stock level.
    #[must_use]
    pub const fn new(units: u32) -> Self {
        Self(units)
    }

    /// Create a stock level from an untrusted signed count.
    ///
    /// Negative counts are treated as nothing available.
    #[must_use]
    pub fn from_raw(units: i64) -> Self {
        Self(u32::try_from(units.max(0)).unwrap_or(u32::MAX))
    }

    /// Get the number of units.
    #[must_use]
    pub const fn units(&self) -> u32 {
        self.0
    }

    /// Whether nothing is available.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// The shopper-facing status for this stock level.
    #[must_use]
    pub const fn status(&self) -> StockStatus {
        match self.0 {
            0 => StockStatus::OutOfStock,
            n if n > Self::LOW_THRESHOLD => StockStatus::Available(n),
            n => StockStatus::Low(n),
        }
    }
}

impl From<u32> for Stock {
    fn from(units: u32) -> Self {
        Self(units)
    }
}

/// Stock availability as presented next to the size selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "units")]
pub enum StockStatus {
    /// More than [`Stock::LOW_THRESHOLD`] units.
    Available(u32),
    /// Between 1 and [`Stock::LOW_THRESHOLD`] units.
    Low(u32),
    OutOfStock,
}

impl StockStatus {
    /// Human-readable availability text.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Available(n) => format!("In stock ({n} available)"),
            Self::Low(n) => format!("Only {n} left"),
            Self::OutOfStock => "Out of stock".to_string(),
        }
    }

    /// CSS class used to style the availability text.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Available(_) => "stock-available",
            Self::Low(_) => "stock-low",
            Self::OutOfStock => "stock-out",
        }
    }
}
