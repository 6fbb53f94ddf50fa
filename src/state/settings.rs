//! Organization settings screen.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::time::{Duration, Instant};

use super::form::{ValidationError, parse_count};
use super::view::{LoadState, fetch_protected, run_protected};
use crate::net::InventoryApi;
use crate::net::types::{DEFAULT_LOW_STOCK_THRESHOLD, Settings};
use crate::session::AuthGateway;

pub const SETTINGS_LOAD_FAILED: &str = "Failed to load settings.";
pub const SAVE_FAILED: &str = "Failed to save settings. Please try again.";

/// How long the "saved" confirmation stays visible.
pub const SUCCESS_VISIBLE_FOR: Duration = Duration::from_secs(3);

#[derive(Clone, Debug)]
pub struct SettingsState {
    pub status: LoadState<Settings>,
    /// Value in the threshold input.
    pub threshold: u32,
    pub saving: bool,
    pub error: Option<String>,
    saved_at: Option<Instant>,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            status: LoadState::Loading,
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            saving: false,
            error: None,
            saved_at: None,
        }
    }
}

impl SettingsState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway) {
        self.status = LoadState::Loading;
        self.status = fetch_protected(gateway, SETTINGS_LOAD_FAILED, |token| async move {
            api.settings(&token).await
        })
        .await;
        if let Some(settings) = self.status.data() {
            self.threshold = settings.default_low_stock_threshold;
        }
    }

    /// Replace the threshold from raw text input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invalid` and leaves the field unchanged when
    /// the text is not a whole number >= 0.
    pub fn set_threshold_input(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.threshold = parse_count("defaultLowStockThreshold", raw)?;
        Ok(())
    }

    /// Save the current threshold. Returns `true` on success and starts the
    /// confirmation window at `now`.
    pub async fn save(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway, now: Instant) -> bool {
        let settings = Settings { default_low_stock_threshold: self.threshold };
        self.error = None;
        self.saved_at = None;
        self.saving = true;
        let result = run_protected(gateway, |token| async move { api.update_settings(&token, &settings).await }).await;
        self.saving = false;

        match result {
            Ok(()) => {
                self.status = LoadState::Ready(settings);
                self.saved_at = Some(now);
                true
            }
            Err(error) if error.is_unauthenticated() => {
                self.status = LoadState::Unauthenticated;
                false
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to save settings");
                self.error = Some(SAVE_FAILED.to_owned());
                false
            }
        }
    }

    /// Whether the "saved" confirmation is showing at `now`.
    #[must_use]
    pub fn success_visible(&self, now: Instant) -> bool {
        self.saved_at
            .is_some_and(|saved| now.saturating_duration_since(saved) < SUCCESS_VISIBLE_FOR)
    }
}
