//! Dashboard summary and the organization header shown above every
//! protected screen.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use super::view::{LoadState, fetch_protected, run_protected};
use crate::net::InventoryApi;
use crate::net::types::DashboardStats;
use crate::session::AuthGateway;

pub const DASHBOARD_LOAD_FAILED: &str = "Failed to load dashboard.";
pub const DEFAULT_ORGANIZATION_NAME: &str = "Inventory Management";

#[derive(Clone, Debug, Default)]
pub struct DashboardState {
    pub stats: LoadState<DashboardStats>,
}

impl DashboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway) {
        self.stats = LoadState::Loading;
        self.stats = fetch_protected(gateway, DASHBOARD_LOAD_FAILED, |token| async move {
            api.dashboard(&token).await
        })
        .await;
    }

    #[must_use]
    pub fn low_stock_count(&self) -> usize {
        self.stats.data().map_or(0, |stats| stats.low_stock_items.len())
    }
}

/// Organization name for the layout header.
///
/// Failures are silent: the header keeps the default name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationHeader {
    pub name: String,
}

impl Default for OrganizationHeader {
    fn default() -> Self {
        Self { name: DEFAULT_ORGANIZATION_NAME.to_owned() }
    }
}

impl OrganizationHeader {
    pub async fn load(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway) {
        let result = run_protected(gateway, |token| async move { api.dashboard(&token).await }).await;
        match result {
            Ok(DashboardStats { organization_name: Some(name), .. }) if !name.is_empty() => self.name = name,
            Ok(_) => {}
            Err(error) if error.is_unauthenticated() => {}
            Err(error) => tracing::warn!(error = %error, "failed to fetch organization name"),
        }
    }
}
