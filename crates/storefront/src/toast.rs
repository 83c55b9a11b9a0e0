//! Transient notifications.
//!
//! Toasts are shown in the page corner and dismissed automatically after
//! [`TOAST_TTL`]. Time comes from `tokio::time` so tests can pause the clock.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    /// Bootstrap alert class.
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self {
            Self::Success => "alert-success",
            Self::Error => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub level: ToastLevel,
    pub expires_at: Instant,
}

/// The set of toasts currently on screen.
#[derive(Debug, Default)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    /// Show a toast now. Returns its id.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.push_at(Instant::now(), level, message)
    }

    /// Show a toast as of `now`. Returns its id.
    pub fn push_at(&mut self, now: Instant, level: ToastLevel, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: message.into(),
            level,
            expires_at: now + TOAST_TTL,
        });
        id
    }

    /// Drop every toast whose time is up.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|toast| toast.expires_at > now);
    }

    /// Close a toast early (the close button). Returns `false` if it was
    /// already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|toast| toast.id != id);
        self.items.len() != before
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.items.iter().filter(move |toast| toast.expires_at > now)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
