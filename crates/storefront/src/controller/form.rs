//! Add-to-cart form guard.

use maison_core::{ProductId, SizeCode};
use serde::Serialize;
use thiserror::Error;

/// Why the add-to-cart form was not submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please select a size before adding to cart.")]
    SizeRequired,
}

/// Fields the add-to-cart form is submitted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeCode>,
    /// Absent when the page has no quantity input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl AddToCartForm {
    /// Hidden inputs to append to the form before it is sent.
    #[must_use]
    pub fn hidden_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::with_capacity(2);
        if let Some(size) = &self.size {
            fields.push(("size", size.to_string()));
        }
        if let Some(quantity) = self.quantity {
            fields.push(("quantity", quantity.to_string()));
        }
        fields
    }
}
