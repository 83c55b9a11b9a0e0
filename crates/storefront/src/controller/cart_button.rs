//! Cart button state machine.

use maison_core::Price;
use serde::Serialize;

use crate::view::CartButtonView;

/// Label shown while a size still has to be chosen.
pub const SELECT_SIZE_LABEL: &str = "Select a size";

/// ```text
/// NO_VARIANTS_REQUIRED                (product has no sizes)
/// AWAITING_SIZE --select_size--> READY --select_size--> READY
/// ```
///
/// A page with exactly one size starts in `READY` because that size is
/// selected on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartButtonState {
    NoVariantsRequired,
    AwaitingSize,
    Ready,
}

impl CartButtonState {
    #[must_use]
    pub const fn derive(has_sizable_variants: bool, size_selected: bool) -> Self {
        match (has_sizable_variants, size_selected) {
            (false, _) => Self::NoVariantsRequired,
            (true, false) => Self::AwaitingSize,
            (true, true) => Self::Ready,
        }
    }

    #[must_use]
    pub const fn can_add_to_cart(&self) -> bool {
        !matches!(self, Self::AwaitingSize)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoVariantsRequired => "NO_VARIANTS_REQUIRED",
            Self::AwaitingSize => "AWAITING_SIZE",
            Self::Ready => "READY",
        }
    }

    /// Button presentation for `quantity` units at `unit_price`.
    #[must_use]
    pub fn view(self, unit_price: &Price, quantity: u32) -> CartButtonView {
        if self.can_add_to_cart() {
            CartButtonView {
                state: self,
                label: format!("Add to cart - {}", unit_price.times(quantity)),
                disabled: false,
            }
        } else {
            CartButtonView {
                state: self,
                label: SELECT_SIZE_LABEL.to_string(),
                disabled: true,
            }
        }
    }
}
