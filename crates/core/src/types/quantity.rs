//! Bounded quantity selection.

use serde::{Deserialize, Serialize};

/// The quantity a shopper intends to buy, bounded by `[MIN, max]`.
///
/// Every mutation clamps silently. When `max` drops below [`Self::MIN`]
/// (nothing in stock) the value stays at [`Self::MIN`]; the floor wins over
/// the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    value: u32,
    max: u32,
}

impl Quantity {
    /// Smallest quantity that can be ordered.
    pub const MIN: u32 = 1;

    /// Start at [`Self::MIN`] with the given ceiling.
    #[must_use]
    pub const fn new(max: u32) -> Self {
        Self {
            value: Self::MIN,
            max,
        }
    }

    /// Current quantity.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Current ceiling.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Replace the ceiling, pulling the value down if it now exceeds it.
    pub fn set_max(&mut self, max: u32) {
        self.max = max;
        if self.value > max {
            self.value = max.max(Self::MIN);
        }
    }

    /// Apply a relative change.
    ///
    /// A change that would go below [`Self::MIN`] is ignored; a change past
    /// the ceiling stops at the ceiling. Returns `true` if the value changed.
    pub fn step(&mut self, delta: i64) -> bool {
        let target = i64::from(self.value).saturating_add(delta);
        if target < i64::from(Self::MIN) {
            return false;
        }
        self.replace(target)
    }

    /// Set an absolute value, clamping it into `[MIN, max]`.
    ///
    /// Returns `true` if the value changed.
    pub fn set(&mut self, requested: i64) -> bool {
        self.replace(requested.max(i64::from(Self::MIN)))
    }

    /// Whether the minus stepper can act.
    #[must_use]
    pub const fn can_decrease(&self) -> bool {
        self.value > Self::MIN
    }

    /// Whether the plus stepper can act.
    #[must_use]
    pub const fn can_increase(&self) -> bool {
        self.value < self.max
    }

    fn replace(&mut self, target: i64) -> bool {
        let ceiling = i64::from(self.max.max(Self::MIN));
        let clamped = u32::try_from(target.min(ceiling)).unwrap_or(Self::MIN);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::new(Self::MIN)
    }
}
