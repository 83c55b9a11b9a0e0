//! Wishlist button state.

use std::cell::Cell;

use maison_core::WishlistMembership;

use crate::view::WishlistButtonView;

/// Result of a wishlist toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server applied the change; carries the membership it confirmed.
    Updated(WishlistMembership),
    /// The server refused the change with this message.
    Rejected(String),
    /// The request never got a usable answer.
    Failed,
    /// A previous toggle is still in flight; nothing was sent.
    Busy,
    /// The page has no wishlist button.
    Unavailable,
}

/// Cached membership plus the in-flight flag that disables the button.
#[derive(Debug, Default)]
pub(crate) struct WishlistControl {
    membership: Cell<WishlistMembership>,
    busy: Cell<bool>,
    /// Status answer that arrived while a toggle was in flight.
    deferred: Cell<Option<WishlistMembership>>,
}

impl WishlistControl {
    pub(crate) fn membership(&self) -> WishlistMembership {
        self.membership.get()
    }

    pub(crate) fn set_membership(&self, membership: WishlistMembership) {
        self.membership.set(membership);
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Keep a status answer until the in-flight toggle settles.
    pub(crate) fn defer_status(&self, status: WishlistMembership) {
        self.deferred.set(Some(status));
    }

    /// Disable the button for the lifetime of the returned guard.
    ///
    /// `None` while another guard is alive.
    pub(crate) fn begin(&self) -> Option<BusyGuard<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(BusyGuard { control: self })
    }

    fn settle(&self) {
        self.busy.set(false);
        if let Some(status) = self.deferred.take() {
            if self.membership() == WishlistMembership::Unknown {
                self.set_membership(status);
            }
        }
    }

    pub(crate) fn view(&self) -> WishlistButtonView {
        WishlistButtonView::new(self.membership(), self.is_busy())
    }
}

/// Re-enables the wishlist button when dropped, whatever the exit path, and
/// applies a deferred status if the toggle left membership unknown.
pub(crate) struct BusyGuard<'a> {
    control: &'a WishlistControl,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.control.settle();
    }
}
