//! HTML rendering of the product page view model.
//!
//! Each interactive region has its own partial under `templates/partials/`.
//! [`HtmlRenderer::render`] produces one fragment per region the page
//! actually has, ready to be swapped into place.

use askama::Template;

use crate::error::RenderError;
use crate::page::Regions;
use crate::view::{
    CartButtonView, GalleryView, PageView, QuantityView, SizeOptionView, StockInfoView, ToastView,
    WishlistButtonView,
};

#[derive(Template)]
#[template(path = "partials/cart_button.html")]
struct CartButtonTemplate<'a> {
    button: &'a CartButtonView,
}

#[derive(Template)]
#[template(path = "partials/wishlist_button.html")]
struct WishlistButtonTemplate<'a> {
    button: &'a WishlistButtonView,
}

#[derive(Template)]
#[template(path = "partials/size_selector.html")]
struct SizeSelectorTemplate<'a> {
    sizes: &'a [SizeOptionView],
    /// Value of the hidden `size` input; empty until a size is chosen.
    selected: String,
}

#[derive(Template)]
#[template(path = "partials/quantity_input.html")]
struct QuantityInputTemplate {
    quantity: QuantityView,
}

#[derive(Template)]
#[template(path = "partials/stock_info.html")]
struct StockInfoTemplate<'a> {
    info: Option<&'a StockInfoView>,
}

#[derive(Template)]
#[template(path = "partials/gallery.html")]
struct GalleryTemplate<'a> {
    gallery: &'a GalleryView,
}

#[derive(Template)]
#[template(path = "partials/toasts.html")]
struct ToastsTemplate<'a> {
    toasts: &'a [ToastView],
}

/// Rendered fragments, one per region. `None` means the page has no such
/// region and nothing should be written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub cart_button: Option<String>,
    pub wishlist_button: Option<String>,
    pub size_selector: Option<String>,
    pub quantity_input: Option<String>,
    pub stock_info: Option<String>,
    pub gallery: Option<String>,
    /// The toast stack is appended to the page body, so it always exists.
    pub toasts: String,
}

/// Turns a [`PageView`] into HTML fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Render every region present in `regions`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if a partial fails to render.
    pub fn render(&self, view: &PageView, regions: &Regions) -> Result<RenderedPage, RenderError> {
        let selected = view
            .sizes
            .iter()
            .find(|option| option.active)
            .map(|option| option.size.to_string())
            .unwrap_or_default();

        Ok(RenderedPage {
            cart_button: region(
                regions.cart_button,
                CartButtonTemplate {
                    button: &view.cart_button,
                },
            )?,
            wishlist_button: region(
                regions.wishlist_button,
                WishlistButtonTemplate {
                    button: &view.wishlist_button,
                },
            )?,
            size_selector: region(
                regions.size_selector,
                SizeSelectorTemplate {
                    sizes: &view.sizes,
                    selected,
                },
            )?,
            quantity_input: region(
                regions.quantity_input,
                QuantityInputTemplate {
                    quantity: view.quantity,
                },
            )?,
            stock_info: region(
                regions.stock_info,
                StockInfoTemplate {
                    info: view.stock_info.as_ref(),
                },
            )?,
            gallery: region(
                regions.gallery,
                GalleryTemplate {
                    gallery: &view.gallery,
                },
            )?,
            toasts: ToastsTemplate {
                toasts: &view.toasts,
            }
            .render()?,
        })
    }
}

fn region<T: Template>(present: bool, template: T) -> Result<Option<String>, RenderError> {
    if present {
        Ok(Some(template.render()?))
    } else {
        Ok(None)
    }
}
