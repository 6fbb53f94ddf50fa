//! Form input and required-field validation.
//!
//! Validation runs before any request is built; a form that fails it never
//! reaches the network.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use crate::net::types::{DEFAULT_LOW_STOCK_THRESHOLD, Product, ProductInput};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be {expected}")]
    Invalid { field: &'static str, expected: &'static str },
}

/// Trimmed non-empty value of a required field.
///
/// # Errors
///
/// Returns `ValidationError::Required` when the value is blank.
pub fn require(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_owned())
}

/// Parse a non-negative whole number typed into a numeric field.
///
/// # Errors
///
/// Returns `ValidationError::Invalid` for anything that is not a whole number >= 0.
pub fn parse_count(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::Invalid { field, expected: "a whole number of 0 or more" })
}

fn check_price(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::Invalid { field, expected: "a price of 0 or more" })
    }
}

/// Editable product fields, prefilled with the create-dialog defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub sku: String,
    pub description: String,
    pub quantity_on_hand: u32,
    pub cost_price: f64,
    pub selling_price: f64,
    pub low_stock_threshold: u32,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sku: String::new(),
            description: String::new(),
            quantity_on_hand: 0,
            cost_price: 0.0,
            selling_price: 0.0,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl ProductForm {
    /// Form prefilled from an existing product for the edit dialog.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            sku: product.sku.clone(),
            description: product.description.clone().unwrap_or_default(),
            quantity_on_hand: product.quantity_on_hand,
            cost_price: product.cost_price.unwrap_or(0.0),
            selling_price: product.selling_price.unwrap_or(0.0),
            low_stock_threshold: product.effective_threshold(),
        }
    }

    /// Validate and convert to the request body.
    ///
    /// # Errors
    ///
    /// Returns the first failing field: name and SKU are required, prices
    /// must be finite and non-negative.
    pub fn validate(&self) -> Result<ProductInput, ValidationError> {
        let name = require("name", &self.name)?;
        let sku = require("sku", &self.sku)?;
        let cost_price = check_price("costPrice", self.cost_price)?;
        let selling_price = check_price("sellingPrice", self.selling_price)?;
        let description = Some(self.description.trim())
            .filter(|text| !text.is_empty())
            .map(ToOwned::to_owned);

        Ok(ProductInput {
            name,
            sku,
            description,
            quantity_on_hand: self.quantity_on_hand,
            cost_price: Some(cost_price),
            selling_price: Some(selling_price),
            low_stock_threshold: Some(self.low_stock_threshold),
        })
    }
}
