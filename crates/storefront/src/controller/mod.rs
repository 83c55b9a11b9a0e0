//! Product-page interaction controller.
//!
//! One [`ProductPageController`] is built per rendered page from its
//! [`ProductPage`] description and a [`WishlistService`]. Event handlers call
//! its methods; the rendering adapter reads [`ProductPageController::view`]
//! after each call.
//!
//! # Concurrency
//!
//! The controller lives on the page's single event-loop thread. State sits in
//! `Cell`/`RefCell` and is never borrowed across an await, so wishlist
//! requests can be in flight while other gestures are handled. The only
//! suspension points are the wishlist requests.

mod cart_button;
mod form;
mod gallery;
mod selection;
mod wishlist;

use std::cell::RefCell;
use std::num::IntErrorKind;

use maison_core::{Price, ProductId, Quantity, SizeCode, Stock, WishlistMembership};
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::{add_breadcrumb, report_error};
use crate::page::{ProductPage, Regions};
use crate::toast::{ToastLevel, Toasts};
use crate::view::{PageView, QuantityView, StockInfoView, ToastView};
use crate::wishlist::WishlistService;

pub use cart_button::{CartButtonState, SELECT_SIZE_LABEL};
pub use form::{AddToCartForm, SubmitError};
pub use gallery::Gallery;
pub use selection::VariantSelection;
pub use wishlist::ToggleOutcome;

use wishlist::WishlistControl;

const ADD_FAILED_MESSAGE: &str = "Could not add this product to your wishlist";
const REMOVE_FAILED_MESSAGE: &str = "Could not remove this product from your wishlist";
const ADDED_MESSAGE: &str = "Added to your wishlist";
const REMOVED_MESSAGE: &str = "Removed from your wishlist";

struct PageState {
    selection: VariantSelection,
    quantity: Quantity,
    gallery: Gallery,
    toasts: Toasts,
}

/// Keeps size, quantity, cart button and wishlist button consistent with each
/// other and with the wishlist service.
pub struct ProductPageController<W> {
    product_id: ProductId,
    unit_price: Price,
    regions: Regions,
    service: W,
    wishlist: WishlistControl,
    state: RefCell<PageState>,
}

// Confined to the page's event loop: futures borrow the controller's cells.
#[allow(clippy::future_not_send)]
impl<W: WishlistService> ProductPageController<W> {
    /// Build the controller for a freshly loaded page.
    ///
    /// If exactly one size is available it is selected immediately. Without a
    /// size selector the product is treated as having no sizes.
    pub fn new(page: ProductPage, service: W) -> Self {
        let ProductPage {
            config,
            sizes,
            images,
            regions,
        } = page;

        let sizes = if regions.size_selector { sizes } else { Vec::new() };
        let mut selection = VariantSelection::new(sizes);
        let mut quantity = Quantity::new(config.total_stock().units());

        if let Some((size, stock)) = selection.sole_available() {
            selection.select(&size, stock);
            quantity.set_max(stock.units());
            debug!(size = %size, "Auto-selected the only available size");
        }

        Self {
            product_id: config.product_id,
            unit_price: config.unit_price(),
            regions,
            service,
            wishlist: WishlistControl::default(),
            state: RefCell::new(PageState {
                selection,
                quantity,
                gallery: Gallery::new(images),
                toasts: Toasts::default(),
            }),
        }
    }

    /// Page-load hook: hydrates the wishlist button.
    pub async fn init(&self) {
        self.check_wishlist_status().await;
    }

    #[must_use]
    pub const fn regions(&self) -> &Regions {
        &self.regions
    }

    // =========================================================================
    // Size & quantity
    // =========================================================================

    /// Make `size` the active size with `stock_at_size` units available.
    ///
    /// The quantity ceiling becomes the size's stock (negative stock counts as
    /// none) and the quantity is pulled down to it if needed. Sizes that are
    /// not available on this page are ignored. Returns `true` if the
    /// selection was applied.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub fn select_size(&self, size: &SizeCode, stock_at_size: i64) -> bool {
        if !self.regions.size_selector {
            return false;
        }
        let stock = Stock::from_raw(stock_at_size);
        {
            let mut state = self.state.borrow_mut();
            if !state.selection.select(size, stock) {
                debug!("Ignoring selection of an unknown or unavailable size");
                return false;
            }
            state.quantity.set_max(stock.units());
        }

        add_breadcrumb(
            "product_page",
            "Selected size",
            Some(&[("size", size.as_str())]),
        );
        true
    }

    /// Apply a stepper click (`±1`) or any other relative change.
    ///
    /// Changes below the minimum are ignored; changes past the ceiling stop
    /// at the ceiling. Returns `true` if the quantity changed.
    pub fn adjust_quantity(&self, delta: i64) -> bool {
        if !self.regions.quantity_input {
            return false;
        }
        self.state.borrow_mut().quantity.step(delta)
    }

    /// Apply text typed into the quantity input.
    ///
    /// Numbers are clamped into range, including ones too long to parse;
    /// anything else leaves the quantity as it was. Returns `true` if the
    /// quantity changed.
    pub fn enter_quantity(&self, raw: &str) -> bool {
        if !self.regions.quantity_input {
            return false;
        }
        let requested = match raw.trim().parse::<i64>() {
            Ok(requested) => requested,
            Err(err) => match err.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => {
                    debug!(input = raw, "Ignoring non-numeric quantity");
                    return false;
                }
            },
        };
        self.state.borrow_mut().quantity.set(requested)
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.state.borrow().quantity
    }

    #[must_use]
    pub fn selected_size(&self) -> Option<SizeCode> {
        self.state
            .borrow()
            .selection
            .selected()
            .map(|option| option.size.clone())
    }

    #[must_use]
    pub fn cart_button_state(&self) -> CartButtonState {
        let state = self.state.borrow();
        CartButtonState::derive(
            state.selection.has_sizable_variants(),
            state.selection.selected().is_some(),
        )
    }

    #[must_use]
    pub fn can_add_to_cart(&self) -> bool {
        self.cart_button_state().can_add_to_cart()
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    #[must_use]
    pub fn membership(&self) -> WishlistMembership {
        self.wishlist.membership()
    }

    #[must_use]
    pub fn is_wishlist_busy(&self) -> bool {
        self.wishlist.is_busy()
    }

    /// Flip wishlist membership through the wishlist service.
    ///
    /// The button is disabled until the request settles; a call made in the
    /// meantime returns [`ToggleOutcome::Busy`] without sending anything. On
    /// success the cached membership becomes whatever the server confirmed.
    /// On failure it is left untouched. Either way a toast is shown and the
    /// button is re-enabled.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn toggle_wishlist(&self) -> ToggleOutcome {
        if !self.regions.wishlist_button {
            return ToggleOutcome::Unavailable;
        }
        let Some(_busy) = self.wishlist.begin() else {
            debug!("Wishlist request already in flight");
            return ToggleOutcome::Busy;
        };

        let target = self.wishlist.membership().toggled();
        let adding = target.is_saved();
        add_breadcrumb(
            "product_page",
            if adding {
                "Added to wishlist"
            } else {
                "Removed from wishlist"
            },
            None,
        );

        let result = if adding {
            self.service.add(self.product_id).await
        } else {
            self.service.remove(self.product_id).await
        };

        match result {
            Ok(reply) if reply.success => {
                let confirmed = reply
                    .in_wishlist
                    .map_or(target, WishlistMembership::from);
                self.wishlist.set_membership(confirmed);
                info!(membership = ?confirmed, "Wishlist updated");

                let fallback = if adding { ADDED_MESSAGE } else { REMOVED_MESSAGE };
                self.notify(ToastLevel::Success, non_empty_or(reply.message, fallback));
                ToggleOutcome::Updated(confirmed)
            }
            Ok(reply) => {
                warn!(message = %reply.message, "Wishlist change refused");
                let fallback = if adding {
                    ADD_FAILED_MESSAGE
                } else {
                    REMOVE_FAILED_MESSAGE
                };
                let message = non_empty_or(reply.message, fallback);
                self.notify(ToastLevel::Error, message.clone());
                ToggleOutcome::Rejected(message)
            }
            Err(err) => {
                report_error("Wishlist request failed", &err);
                self.notify(
                    ToastLevel::Error,
                    if adding {
                        ADD_FAILED_MESSAGE
                    } else {
                        REMOVE_FAILED_MESSAGE
                    },
                );
                ToggleOutcome::Failed
            }
        }
    }

    /// Ask the wishlist service whether the product is saved.
    ///
    /// Best effort: a failure is logged and the membership stays as it was.
    /// The answer only fills an unknown membership. While a toggle is in
    /// flight it is held back and applied once the toggle settles, unless the
    /// toggle itself confirmed a membership.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn check_wishlist_status(&self) -> WishlistMembership {
        if !self.regions.wishlist_button {
            return self.wishlist.membership();
        }

        match self.service.status(self.product_id).await {
            Ok(in_wishlist) => {
                let status = WishlistMembership::from(in_wishlist);
                if self.wishlist.is_busy() {
                    debug!("Holding status until the pending toggle settles");
                    self.wishlist.defer_status(status);
                } else if self.wishlist.membership() == WishlistMembership::Unknown {
                    self.wishlist.set_membership(status);
                } else {
                    debug!("Discarding status superseded by a toggle");
                }
            }
            Err(err) => warn!(error = %err, "Wishlist status check failed"),
        }

        self.wishlist.membership()
    }

    // =========================================================================
    // Form, gallery, notifications
    // =========================================================================

    /// Validate the add-to-cart form before it is sent.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::SizeRequired`] (and shows it as a toast) when
    /// the product has sizes and none is selected.
    pub fn submit_add_to_cart(&self) -> Result<AddToCartForm, SubmitError> {
        let mut state = self.state.borrow_mut();

        if state.selection.has_sizable_variants() && state.selection.selected().is_none() {
            let err = SubmitError::SizeRequired;
            state.toasts.prune(Instant::now());
            state.toasts.push(ToastLevel::Error, err.to_string());
            return Err(err);
        }

        Ok(AddToCartForm {
            product_id: self.product_id,
            size: state.selection.selected().map(|option| option.size.clone()),
            quantity: self
                .regions
                .quantity_input
                .then(|| state.quantity.value()),
        })
    }

    /// Show the gallery image at `index`. Returns `true` if it changed.
    pub fn select_thumbnail(&self, index: usize) -> bool {
        if !self.regions.gallery {
            return false;
        }
        self.state.borrow_mut().gallery.select(index)
    }

    /// Close a toast before it expires.
    pub fn dismiss_toast(&self, id: u64) -> bool {
        self.state.borrow_mut().toasts.dismiss(id)
    }

    fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        let mut state = self.state.borrow_mut();
        state.toasts.prune(Instant::now());
        state.toasts.push(level, message);
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Project the current state into the page's view model.
    #[must_use]
    pub fn view(&self) -> PageView {
        let now = Instant::now();
        let mut state = self.state.borrow_mut();
        state.toasts.prune(now);

        let cart_state = CartButtonState::derive(
            state.selection.has_sizable_variants(),
            state.selection.selected().is_some(),
        );
        let quantity = state.quantity;

        PageView {
            cart_button: cart_state.view(&self.unit_price, quantity.value()),
            wishlist_button: self.wishlist.view(),
            sizes: state.selection.views(),
            quantity: QuantityView {
                value: quantity.value(),
                min: Quantity::MIN,
                max: quantity.max(),
                minus_disabled: !quantity.can_decrease(),
                plus_disabled: !quantity.can_increase(),
            },
            stock_info: state.selection.stock_at_size().map(|stock| {
                let status = stock.status();
                StockInfoView {
                    message: status.message(),
                    css_class: status.css_class(),
                }
            }),
            gallery: state.gallery.view(),
            toasts: state
                .toasts
                .visible(now)
                .map(|toast| ToastView {
                    id: toast.id,
                    message: toast.message.clone(),
                    level: toast.level,
                })
                .collect(),
        }
    }
}

fn non_empty_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use maison_core::CurrencyCode;
    use rust_decimal::Decimal;
    use tokio::sync::Notify;

    use super::*;
    use crate::error::WishlistError;
    use crate::page::{ProductConfig, SizeOption};
    use crate::toast::TOAST_TTL;
    use crate::wishlist::WishlistReply;

    // -------------------------------------------------------------------------
    // Fake wishlist service
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct FakeWishlist {
        status: Mutex<Option<Result<bool, u16>>>,
        replies: Mutex<VecDeque<Result<WishlistReply, u16>>>,
        gate: Option<Arc<Notify>>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        mutations: Mutex<Vec<&'static str>>,
    }

    impl FakeWishlist {
        fn with_status(self, status: Result<bool, u16>) -> Self {
            *self.status.lock().unwrap() = Some(status);
            self
        }

        fn with_reply(self, reply: Result<WishlistReply, u16>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn with_gate(mut self, gate: Arc<Notify>) -> Self {
            self.gate = Some(gate);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn mutate(&self, kind: &'static str) -> Result<WishlistReply, WishlistError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            self.mutations.lock().unwrap().push(kind);

            if let Some(gate) = &self.gate {
                gate.notified().await;
            }

            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            let next = self.replies.lock().unwrap().pop_front();
            match next {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(status)) => Err(api_error(status)),
                None => Ok(reply(true, Some(kind == "add"), "")),
            }
        }
    }

    #[async_trait]
    impl WishlistService for FakeWishlist {
        async fn status(&self, _product_id: ProductId) -> Result<bool, WishlistError> {
            let status = *self.status.lock().unwrap();
            match status {
                Some(Ok(in_wishlist)) => Ok(in_wishlist),
                Some(Err(code)) => Err(api_error(code)),
                None => Ok(false),
            }
        }

        async fn add(&self, _product_id: ProductId) -> Result<WishlistReply, WishlistError> {
            self.mutate("add").await
        }

        async fn remove(&self, _product_id: ProductId) -> Result<WishlistReply, WishlistError> {
            self.mutate("remove").await
        }
    }

    fn api_error(status: u16) -> WishlistError {
        WishlistError::Api {
            status,
            message: "upstream unavailable".to_string(),
        }
    }

    fn reply(success: bool, in_wishlist: Option<bool>, message: &str) -> WishlistReply {
        WishlistReply {
            success,
            in_wishlist,
            message: message.to_string(),
        }
    }

    // -------------------------------------------------------------------------
    // Page fixtures
    // -------------------------------------------------------------------------

    fn size(code: &str) -> SizeCode {
        SizeCode::parse(code).unwrap()
    }

    fn config(total_stock: i64) -> ProductConfig {
        ProductConfig {
            product_id: ProductId::new(42),
            price: Decimal::new(2990, 2),
            currency: CurrencyCode::EUR,
            total_stock,
        }
    }

    /// S: 2, M: 10, L: 0.
    fn three_size_page() -> ProductPage {
        ProductPage::new(config(12)).with_sizes(vec![
            SizeOption::new(size("S"), 2),
            SizeOption::new(size("M"), 10),
            SizeOption::new(size("L"), 0),
        ])
    }

    fn controller(page: ProductPage) -> ProductPageController<Arc<FakeWishlist>> {
        ProductPageController::new(page, Arc::new(FakeWishlist::default()))
    }

    // -------------------------------------------------------------------------
    // Cart button state machine
    // -------------------------------------------------------------------------

    #[test]
    fn test_multiple_sizes_start_awaiting_size() {
        let controller = controller(three_size_page());
        let view = controller.view();

        assert_eq!(view.cart_button.state, CartButtonState::AwaitingSize);
        assert!(view.cart_button.disabled);
        assert_eq!(view.cart_button.label, SELECT_SIZE_LABEL);
        assert!(controller.selected_size().is_none());
        assert!(view.sizes.iter().all(|s| !s.active));
    }

    #[test]
    fn test_single_size_is_auto_selected() {
        let page = ProductPage::new(config(5)).with_sizes(vec![SizeOption::new(size("U"), 5)]);
        let controller = controller(page);

        assert_eq!(controller.cart_button_state(), CartButtonState::Ready);
        assert_eq!(controller.selected_size(), Some(size("U")));
        assert_eq!(controller.quantity().value(), 1);
        assert_eq!(controller.quantity().max(), 5);
        assert_eq!(controller.view().cart_button.label, "Add to cart - €29.90");
    }

    #[test]
    fn test_no_sizes_is_ready_without_selection() {
        let controller = controller(ProductPage::new(config(3)));

        assert_eq!(controller.cart_button_state(), CartButtonState::NoVariantsRequired);
        assert!(controller.can_add_to_cart());
        assert!(!controller.view().cart_button.disabled);
        assert_eq!(controller.quantity().max(), 3);
    }

    #[test]
    fn test_only_unavailable_sizes_count_as_no_variants() {
        let page = ProductPage::new(config(0)).with_sizes(vec![SizeOption {
            size: size("L"),
            stock: 0,
            available: false,
        }]);
        let controller = controller(page);
        assert_eq!(controller.cart_button_state(), CartButtonState::NoVariantsRequired);
    }

    #[test]
    fn test_never_returns_to_awaiting_size() {
        let controller = controller(three_size_page());
        assert!(controller.select_size(&size("M"), 10));
        assert!(controller.select_size(&size("S"), 2));
        assert_eq!(controller.cart_button_state(), CartButtonState::Ready);
        assert!(!controller.select_size(&size("XXL"), 3));
        assert_eq!(controller.cart_button_state(), CartButtonState::Ready);
        assert_eq!(controller.selected_size(), Some(size("S")));
    }

    // -------------------------------------------------------------------------
    // Size & quantity
    // -------------------------------------------------------------------------

    #[test]
    fn test_three_size_scenario() {
        let controller = controller(three_size_page());

        controller.select_size(&size("M"), 10);
        assert_eq!(controller.quantity().max(), 10);
        controller.adjust_quantity(1);
        controller.adjust_quantity(1);
        controller.adjust_quantity(1);
        assert_eq!(controller.quantity().value(), 4);
        assert_eq!(controller.view().cart_button.label, "Add to cart - €119.60");

        controller.select_size(&size("S"), 2);
        assert_eq!(controller.quantity().max(), 2);
        assert_eq!(controller.quantity().value(), 2);
        assert_eq!(controller.view().cart_button.label, "Add to cart - €59.80");

        let view = controller.view();
        let active: Vec<_> = view.sizes.iter().filter(|s| s.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].size, size("S"));
    }

    #[test]
    fn test_select_size_bounds_quantity_for_any_stock() {
        for stock in 0..=12 {
            let controller = controller(three_size_page());
            controller.enter_quantity("12");
            controller.select_size(&size("M"), stock);

            let quantity = controller.quantity();
            assert_eq!(quantity.max(), u32::try_from(stock).unwrap());
            if stock == 0 {
                // Nothing left: the floor wins over the ceiling.
                assert_eq!(quantity.value(), Quantity::MIN);
                assert!(controller.view().quantity.plus_disabled);
            } else {
                assert!(i64::from(quantity.value()) <= stock);
            }
        }
    }

    #[test]
    fn test_negative_stock_treated_as_zero() {
        let controller = controller(three_size_page());
        controller.select_size(&size("M"), -5);
        assert_eq!(controller.quantity().max(), 0);
        assert_eq!(controller.quantity().value(), Quantity::MIN);
        assert!(controller.view().quantity.plus_disabled);
    }

    #[test]
    fn test_adjust_quantity_stays_in_bounds() {
        let controller = controller(three_size_page());
        controller.select_size(&size("S"), 2);

        for delta in [-1, 1, 1, 1, -1, -1, -1, 7, -30, 2] {
            controller.adjust_quantity(delta);
            let q = controller.quantity();
            assert!((Quantity::MIN..=q.max()).contains(&q.value()));
        }
    }

    #[test]
    fn test_minus_below_min_is_noop() {
        let controller = controller(ProductPage::new(config(4)));
        assert!(!controller.adjust_quantity(-1));
        assert!(controller.view().quantity.minus_disabled);
    }

    #[test]
    fn test_enter_quantity_clamps_and_ignores_garbage() {
        let controller = controller(ProductPage::new(config(6)));
        assert!(controller.enter_quantity("99"));
        assert_eq!(controller.quantity().value(), 6);
        assert!(controller.enter_quantity("-4"));
        assert_eq!(controller.quantity().value(), 1);
        assert!(!controller.enter_quantity("two"));
        assert_eq!(controller.quantity().value(), 1);
    }

    #[test]
    fn test_stock_info_follows_selected_size() {
        let controller = controller(three_size_page());
        assert!(controller.view().stock_info.is_none());

        controller.select_size(&size("S"), 2);
        let info = controller.view().stock_info.unwrap();
        assert_eq!(info.message, "Only 2 left");
        assert_eq!(info.css_class, "stock-low");

        controller.select_size(&size("M"), 25);
        assert_eq!(
            controller.view().stock_info.unwrap().message,
            "In stock (25 available)"
        );
    }

    #[test]
    fn test_overlong_quantity_clamps_to_bounds() {
        let controller = controller(ProductPage::new(config(6)));
        assert!(controller.enter_quantity("99999999999999999999"));
        assert_eq!(controller.quantity().value(), 6);
        assert!(controller.enter_quantity("-99999999999999999999"));
        assert_eq!(controller.quantity().value(), 1);
    }

    #[test]
    fn test_missing_size_selector_is_noop() {
        let regions = Regions {
            size_selector: false,
            ..Regions::default()
        };
        let controller = controller(three_size_page().with_regions(regions));

        assert!(!controller.select_size(&size("M"), 10));
        assert!(controller.selected_size().is_none());
        assert_eq!(controller.cart_button_state(), CartButtonState::NoVariantsRequired);
        assert_eq!(controller.quantity().max(), 12);
    }

    #[test]
    fn test_missing_quantity_input_is_noop() {
        let regions = Regions {
            quantity_input: false,
            ..Regions::default()
        };
        let controller = controller(ProductPage::new(config(5)).with_regions(regions));
        assert!(!controller.adjust_quantity(1));
        assert!(!controller.enter_quantity("3"));
        assert_eq!(controller.submit_add_to_cart().unwrap().quantity, None);
    }

    // -------------------------------------------------------------------------
    // Form guard
    // -------------------------------------------------------------------------

    #[test]
    fn test_submit_blocked_until_size_selected() {
        let controller = controller(three_size_page());

        assert_eq!(controller.submit_add_to_cart(), Err(SubmitError::SizeRequired));
        let toasts = controller.view().toasts;
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "Please select a size before adding to cart.");

        controller.select_size(&size("M"), 10);
        controller.adjust_quantity(2);
        let form = controller.submit_add_to_cart().unwrap();
        assert_eq!(form.product_id, ProductId::new(42));
        assert_eq!(form.size, Some(size("M")));
        assert_eq!(form.quantity, Some(3));
    }

    #[test]
    fn test_submit_without_sizes() {
        let controller = controller(ProductPage::new(config(2)));
        let form = controller.submit_add_to_cart().unwrap();
        assert_eq!(form.size, None);
        assert_eq!(form.quantity, Some(1));
    }

    // -------------------------------------------------------------------------
    // Gallery
    // -------------------------------------------------------------------------

    #[test]
    fn test_thumbnail_selection() {
        let page = ProductPage::new(config(1))
            .with_images(vec!["/a.jpg".to_string(), "/b.jpg".to_string()]);
        let controller = controller(page);
        assert!(controller.select_thumbnail(1));
        assert!(!controller.select_thumbnail(9));
        assert_eq!(controller.view().gallery.main_image.as_deref(), Some("/b.jpg"));
    }

    // -------------------------------------------------------------------------
    // Wishlist
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_status_check_hydrates_button() {
        let service = Arc::new(FakeWishlist::default().with_status(Ok(true)));
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        assert_eq!(controller.membership(), WishlistMembership::Unknown);
        controller.init().await;

        let view = controller.view().wishlist_button;
        assert_eq!(view.membership, WishlistMembership::Saved);
        assert_eq!(view.icon, "fas fa-heart");
        assert!(!view.disabled);
    }

    #[tokio::test]
    async fn test_status_failure_stays_unknown_without_toast() {
        let service = Arc::new(FakeWishlist::default().with_status(Err(500)));
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        assert_eq!(
            controller.check_wishlist_status().await,
            WishlistMembership::Unknown
        );
        assert!(controller.view().toasts.is_empty());
        assert_eq!(controller.view().wishlist_button.icon, "far fa-heart");
    }

    #[tokio::test]
    async fn test_toggle_adds_then_removes() {
        let service = Arc::new(
            FakeWishlist::default()
                .with_reply(Ok(reply(true, Some(true), "Robe ajoutée")))
                .with_reply(Ok(reply(true, Some(false), ""))),
        );
        let controller =
            ProductPageController::new(ProductPage::new(config(1)), Arc::clone(&service));

        assert_eq!(
            controller.toggle_wishlist().await,
            ToggleOutcome::Updated(WishlistMembership::Saved)
        );
        assert_eq!(
            controller.toggle_wishlist().await,
            ToggleOutcome::Updated(WishlistMembership::NotSaved)
        );
        assert_eq!(*service.mutations.lock().unwrap(), vec!["add", "remove"]);

        let toasts = controller.view().toasts;
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, "Robe ajoutée");
        assert_eq!(toasts[1].message, "Removed from your wishlist");
        assert!(toasts.iter().all(|t| t.level == ToastLevel::Success));
    }

    #[tokio::test]
    async fn test_toggle_uses_server_confirmed_value() {
        let service = Arc::new(FakeWishlist::default().with_reply(Ok(reply(true, Some(false), "ok"))));
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        let outcome = controller.toggle_wishlist().await;
        assert_eq!(outcome, ToggleOutcome::Updated(WishlistMembership::NotSaved));
        assert_eq!(controller.membership(), WishlistMembership::NotSaved);
    }

    #[tokio::test]
    async fn test_toggle_rejected_keeps_membership() {
        let service = Arc::new(
            FakeWishlist::default()
                .with_status(Ok(false))
                .with_reply(Ok(reply(false, Some(true), "Please sign in first"))),
        );
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);
        controller.init().await;

        let outcome = controller.toggle_wishlist().await;
        assert_eq!(outcome, ToggleOutcome::Rejected("Please sign in first".to_string()));
        assert_eq!(controller.membership(), WishlistMembership::NotSaved);
        assert!(!controller.is_wishlist_busy());

        let toasts = controller.view().toasts;
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "Please sign in first");
    }

    #[tokio::test]
    async fn test_toggle_failure_keeps_membership_and_reenables() {
        let service = Arc::new(
            FakeWishlist::default()
                .with_status(Ok(true))
                .with_reply(Err(503)),
        );
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);
        controller.init().await;

        assert_eq!(controller.toggle_wishlist().await, ToggleOutcome::Failed);
        assert_eq!(controller.membership(), WishlistMembership::Saved);
        assert!(!controller.view().wishlist_button.disabled);
        assert_eq!(
            controller.view().toasts[0].message,
            "Could not remove this product from your wishlist"
        );
    }

    #[tokio::test]
    async fn test_rapid_double_toggle_sends_one_request() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(FakeWishlist::default().with_gate(Arc::clone(&gate)));
        let controller =
            ProductPageController::new(ProductPage::new(config(1)), Arc::clone(&service));

        let first = controller.toggle_wishlist();
        let second = async {
            tokio::task::yield_now().await;
            assert!(controller.view().wishlist_button.disabled);
            let outcome = controller.toggle_wishlist().await;
            gate.notify_one();
            outcome
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(first, ToggleOutcome::Updated(WishlistMembership::Saved));
        assert_eq!(second, ToggleOutcome::Busy);
        assert_eq!(service.calls(), 1);
        assert_eq!(service.max_in_flight.load(Ordering::SeqCst), 1);
        assert!(!controller.is_wishlist_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_toggle_reenables_button() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(FakeWishlist::default().with_gate(gate));
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        let result =
            tokio::time::timeout(Duration::from_millis(50), controller.toggle_wishlist()).await;
        assert!(result.is_err());
        assert!(!controller.is_wishlist_busy());
        assert_eq!(controller.membership(), WishlistMembership::Unknown);
    }

    #[tokio::test]
    async fn test_missing_wishlist_button_sends_nothing() {
        let regions = Regions {
            wishlist_button: false,
            ..Regions::default()
        };
        let service = Arc::new(FakeWishlist::default().with_status(Ok(true)));
        let controller = ProductPageController::new(
            ProductPage::new(config(1)).with_regions(regions),
            Arc::clone(&service),
        );

        controller.init().await;
        assert_eq!(controller.membership(), WishlistMembership::Unknown);
        assert_eq!(controller.toggle_wishlist().await, ToggleOutcome::Unavailable);
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_status_during_failed_toggle_is_applied() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(
            FakeWishlist::default()
                .with_status(Ok(true))
                .with_reply(Err(503))
                .with_gate(Arc::clone(&gate)),
        );
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        let toggle = controller.toggle_wishlist();
        let status = async {
            tokio::task::yield_now().await;
            let during = controller.check_wishlist_status().await;
            gate.notify_one();
            during
        };

        let (outcome, during) = tokio::join!(toggle, status);
        assert_eq!(outcome, ToggleOutcome::Failed);
        assert_eq!(during, WishlistMembership::Unknown);
        assert_eq!(controller.membership(), WishlistMembership::Saved);
        assert_eq!(controller.view().wishlist_button.icon, "fas fa-heart");
    }

    #[tokio::test]
    async fn test_status_during_successful_toggle_is_dropped() {
        let gate = Arc::new(Notify::new());
        let service = Arc::new(
            FakeWishlist::default()
                .with_status(Ok(false))
                .with_reply(Ok(reply(true, Some(true), "")))
                .with_gate(Arc::clone(&gate)),
        );
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        let toggle = controller.toggle_wishlist();
        let status = async {
            tokio::task::yield_now().await;
            controller.check_wishlist_status().await;
            gate.notify_one();
        };

        tokio::join!(toggle, status);
        assert_eq!(controller.membership(), WishlistMembership::Saved);
    }

    #[tokio::test]
    async fn test_status_after_toggle_is_discarded() {
        let service = Arc::new(FakeWishlist::default().with_status(Ok(false)));
        let controller = ProductPageController::new(ProductPage::new(config(1)), service);

        controller.toggle_wishlist().await;
        assert_eq!(
            controller.check_wishlist_status().await,
            WishlistMembership::Saved
        );
    }

    // -------------------------------------------------------------------------
    // Toasts
    // -------------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn test_toasts_expire() {
        let controller = controller(ProductPage::new(config(1)));
        controller.toggle_wishlist().await;
        assert_eq!(controller.view().toasts.len(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(controller.view().toasts.len(), 1);

        tokio::time::advance(TOAST_TTL).await;
        assert!(controller.view().toasts.is_empty());
    }

    #[test]
    fn test_dismiss_toast() {
        let controller = controller(three_size_page());
        let _ = controller.submit_add_to_cart();
        let id = controller.view().toasts[0].id;
        assert!(controller.dismiss_toast(id));
        assert!(controller.view().toasts.is_empty());
    }
}
