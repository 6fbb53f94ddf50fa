//! Inventory display rules shared by the products and dashboard views.

#[cfg(test)]
#[path = "stock_test.rs"]
mod stock_test;

use crate::net::types::{DEFAULT_LOW_STOCK_THRESHOLD, Product};

/// Threshold to apply. Absent and zero both mean "use the default of 5".
#[must_use]
pub fn threshold_or_default(threshold: Option<u32>) -> u32 {
    threshold.filter(|threshold| *threshold > 0).unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD)
}

/// `quantity <= threshold`, with the threshold resolved by [`threshold_or_default`].
#[must_use]
pub fn is_low_stock(quantity: u32, threshold: Option<u32>) -> bool {
    quantity <= threshold_or_default(threshold)
}

/// `$12.50`; `$0.00` when the price is unknown.
#[must_use]
pub fn format_price(price: Option<f64>) -> String {
    format!("${:.2}", price.unwrap_or(0.0))
}

/// Case-insensitive substring match on name or SKU. Empty query matches all.
#[must_use]
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(&query) || product.sku.to_lowercase().contains(&query)
}

/// Products matching `query`, in their original order.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|product| matches_query(product, query))
        .collect()
}
