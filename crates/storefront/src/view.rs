//! Declarative view model of the product page.
//!
//! The controller projects its state into a [`PageView`]; a rendering adapter
//! (see [`crate::render`]) applies it to markup. Nothing here touches the DOM.

use maison_core::{SizeCode, WishlistMembership};
use serde::Serialize;

use crate::controller::CartButtonState;
use crate::toast::ToastLevel;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub cart_button: CartButtonView,
    pub wishlist_button: WishlistButtonView,
    pub sizes: Vec<SizeOptionView>,
    pub quantity: QuantityView,
    pub stock_info: Option<StockInfoView>,
    pub gallery: GalleryView,
    pub toasts: Vec<ToastView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartButtonView {
    pub state: CartButtonState,
    pub label: String,
    pub disabled: bool,
}

/// Colour treatment of the wishlist heart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonVariant {
    Solid,
    Outline,
}

impl ButtonVariant {
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Solid => "btn-danger",
            Self::Outline => "btn-outline-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WishlistButtonView {
    pub membership: WishlistMembership,
    pub title: &'static str,
    pub icon: &'static str,
    pub variant: ButtonVariant,
    /// Set while a toggle request is in flight.
    pub disabled: bool,
}

impl WishlistButtonView {
    #[must_use]
    pub const fn new(membership: WishlistMembership, busy: bool) -> Self {
        if membership.is_saved() {
            Self {
                membership,
                title: "Remove from wishlist",
                icon: "fas fa-heart",
                variant: ButtonVariant::Solid,
                disabled: busy,
            }
        } else {
            Self {
                membership,
                title: "Add to wishlist",
                icon: "far fa-heart",
                variant: ButtonVariant::Outline,
                disabled: busy,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizeOptionView {
    pub size: SizeCode,
    pub stock: u32,
    pub available: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityView {
    pub value: u32,
    pub min: u32,
    pub max: u32,
    pub minus_disabled: bool,
    pub plus_disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockInfoView {
    pub message: String,
    pub css_class: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryView {
    pub main_image: Option<String>,
    pub thumbnails: Vec<ThumbnailView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailView {
    pub url: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToastView {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
}
