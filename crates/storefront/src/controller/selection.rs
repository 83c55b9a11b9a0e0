//! Size selection.

use maison_core::{SizeCode, Stock};

use crate::page::SizeOption;
use crate::view::SizeOptionView;

/// The page's size controls and which one (if any) is active.
///
/// At most one option is active at a time. Once a size is chosen the
/// selection can move to another size but never back to "none".
#[derive(Debug, Clone, Default)]
pub struct VariantSelection {
    options: Vec<SizeOption>,
    selected: Option<usize>,
}

impl VariantSelection {
    #[must_use]
    pub const fn new(options: Vec<SizeOption>) -> Self {
        Self {
            options,
            selected: None,
        }
    }

    /// Whether the shopper has to pick a size before buying.
    #[must_use]
    pub fn has_sizable_variants(&self) -> bool {
        self.options.iter().any(|option| option.available)
    }

    /// The only available option, if there is exactly one.
    #[must_use]
    pub fn sole_available(&self) -> Option<(SizeCode, Stock)> {
        let mut available = self.options.iter().filter(|option| option.available);
        match (available.next(), available.next()) {
            (Some(only), None) => Some((only.size.clone(), only.stock())),
            _ => None,
        }
    }

    /// Make `size` the sole active option, recording `stock` as its stock.
    ///
    /// Returns `false` (and changes nothing) if `size` is not an available
    /// option on this page.
    pub fn select(&mut self, size: &SizeCode, stock: Stock) -> bool {
        let Some(index) = self
            .options
            .iter()
            .position(|option| option.available && &option.size == size)
        else {
            return false;
        };

        if let Some(option) = self.options.get_mut(index) {
            option.stock = i64::from(stock.units());
        }
        self.selected = Some(index);
        true
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SizeOption> {
        self.selected.and_then(|index| self.options.get(index))
    }

    /// Stock of the active option.
    #[must_use]
    pub fn stock_at_size(&self) -> Option<Stock> {
        self.selected().map(SizeOption::stock)
    }

    #[must_use]
    pub fn views(&self) -> Vec<SizeOptionView> {
        self.options
            .iter()
            .enumerate()
            .map(|(index, option)| SizeOptionView {
                size: option.size.clone(),
                stock: option.stock().units(),
                available: option.available,
                active: self.selected == Some(index),
            })
            .collect()
    }
}
