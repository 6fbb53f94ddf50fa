//! Wire types for the inventory REST API.
//!
//! DESIGN
//! ======
//! The backend omits fields freely. Every optional field is either an
//! `Option` or `#[serde(default)]`, and envelopes that may lack their payload
//! decode into explicit "absent" variants instead of failing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::session::SessionToken;

/// Threshold used when neither the product nor the settings provide one.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

fn default_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

// =============================================================================
// AUTH
// =============================================================================

/// `POST /api/auth/login` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// `POST /auth/register` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub organization: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LoginEnvelope {
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Default, Deserialize)]
struct LoginData {
    #[serde(default)]
    token: Option<String>,
}

/// Result of a login request that the server accepted with a 2xx status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Token(SessionToken),
    /// 2xx response without a usable token.
    NoToken,
}

impl From<LoginEnvelope> for LoginOutcome {
    fn from(envelope: LoginEnvelope) -> Self {
        match envelope.data.and_then(|data| data.token) {
            Some(token) if !token.is_empty() => Self::Token(SessionToken::new(token)),
            _ => Self::NoToken,
        }
    }
}

/// `POST /auth/register` response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct RegisterOutcome {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// PRODUCTS
// =============================================================================

/// A product row as returned by `GET /products`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub organization_id: String,
    pub name: String,
    pub sku: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity_on_hand: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Product {
    /// The product's own threshold, or the default when it is absent or zero.
    #[must_use]
    pub fn effective_threshold(&self) -> u32 {
        crate::util::stock::threshold_or_default(self.low_stock_threshold)
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        crate::util::stock::is_low_stock(self.quantity_on_hand, self.low_stock_threshold)
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProductsEnvelope {
    #[serde(default)]
    pub(crate) products: Option<Vec<Product>>,
}

/// Body of `POST /products` and `PUT /products/:id`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity_on_hand: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_stock_threshold: Option<u32>,
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// Product-like summary in the dashboard's low-stock list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity_on_hand: Option<u32>,
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
}

/// Server-derived summary from `GET /dashboard`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub total_products: u64,
    #[serde(default)]
    pub total_stock: u64,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardEnvelope {
    #[serde(default)]
    pub(crate) data: Option<DashboardStats>,
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Organization settings (`GET`/`PUT /api/settings`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_threshold", deserialize_with = "threshold_or_default")]
    pub default_low_stock_threshold: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { default_low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD }
    }
}

fn threshold_or_default<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(crate::util::stock::threshold_or_default(Option::<u32>::deserialize(deserializer)?))
}
