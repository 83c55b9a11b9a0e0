//! Cached wishlist membership.

use serde::{Deserialize, Serialize};

/// Whether the shopper has saved a product to their wishlist.
///
/// The remote wishlist service owns the real value; this is the page's cached
/// copy, which stays `Unknown` until the first status check answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WishlistMembership {
    #[default]
    Unknown,
    Saved,
    NotSaved,
}

impl WishlistMembership {
    /// Whether the product is known to be saved. `Unknown` counts as not saved.
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// The membership a toggle should aim for.
    #[must_use]
    pub const fn toggled(&self) -> Self {
        if self.is_saved() {
            Self::NotSaved
        } else {
            Self::Saved
        }
    }
}

impl From<bool> for WishlistMembership {
    fn from(in_wishlist: bool) -> Self {
        if in_wishlist {
            Self::Saved
        } else {
            Self::NotSaved
        }
    }
}
