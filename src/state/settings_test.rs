use super::*;
use crate::state::test_helpers::MockApi;

fn signed_in() -> AuthGateway {
    let gateway = AuthGateway::in_memory();
    gateway.set_token("abc123").unwrap();
    gateway
}

fn api_with_threshold(threshold: u32) -> MockApi {
    MockApi {
        settings: std::sync::Mutex::new(Settings { default_low_stock_threshold: threshold }),
        ..MockApi::default()
    }
}

// =============================================================================
// load
// =============================================================================

#[test]
fn threshold_defaults_to_five() {
    let state = SettingsState::new();
    assert_eq!(state.threshold, 5);
    assert!(state.status.is_loading());
}

#[tokio::test]
async fn load_fills_threshold() {
    let api = api_with_threshold(12);
    let mut state = SettingsState::new();

    state.load(&api, &signed_in()).await;

    assert_eq!(state.threshold, 12);
    assert_eq!(state.status.data(), Some(&Settings { default_low_stock_threshold: 12 }));
}

#[tokio::test]
async fn load_without_token_keeps_default() {
    let api = api_with_threshold(12);
    let mut state = SettingsState::new();

    state.load(&api, &AuthGateway::in_memory()).await;

    assert!(state.status.is_unauthenticated());
    assert_eq!(state.threshold, 5);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn load_failure_shows_banner_and_keeps_default() {
    let api = api_with_threshold(12);
    api.fail("settings");
    let mut state = SettingsState::new();

    state.load(&api, &signed_in()).await;

    assert_eq!(state.status.banner(), Some("Failed to load settings."));
    assert_eq!(state.threshold, 5);
}

// =============================================================================
// input
// =============================================================================

#[test]
fn threshold_input_accepts_whole_numbers() {
    let mut state = SettingsState::new();
    state.set_threshold_input(" 0 ").unwrap();
    assert_eq!(state.threshold, 0);
}

#[test]
fn threshold_input_rejects_negative_and_text() {
    let mut state = SettingsState::new();
    assert!(state.set_threshold_input("-1").is_err());
    assert!(state.set_threshold_input("ten").is_err());
    assert_eq!(state.threshold, 5);
}

// =============================================================================
// save
// =============================================================================

#[tokio::test]
async fn save_sends_threshold_and_shows_success_for_three_seconds() {
    let api = api_with_threshold(5);
    let gateway = signed_in();
    let mut state = SettingsState::new();
    state.threshold = 8;
    let now = Instant::now();

    assert!(state.save(&api, &gateway, now).await);

    assert_eq!(api.settings.lock().unwrap().default_low_stock_threshold, 8);
    assert!(!state.saving);
    assert!(state.success_visible(now));
    assert!(state.success_visible(now + Duration::from_millis(2_999)));
    assert!(!state.success_visible(now + Duration::from_secs(3)));
}

#[tokio::test]
async fn save_failure_sets_error() {
    let api = api_with_threshold(5);
    api.fail("update_settings");
    let mut state = SettingsState::new();
    let now = Instant::now();

    assert!(!state.save(&api, &signed_in(), now).await);

    assert_eq!(state.error.as_deref(), Some("Failed to save settings. Please try again."));
    assert!(!state.success_visible(now));
}

#[tokio::test]
async fn save_without_token_sends_nothing() {
    let api = api_with_threshold(5);
    let mut state = SettingsState::new();

    assert!(!state.save(&api, &AuthGateway::in_memory(), Instant::now()).await);

    assert!(state.status.is_unauthenticated());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn new_save_clears_previous_error() {
    let api = api_with_threshold(5);
    let gateway = signed_in();
    let mut state = SettingsState::new();
    api.fail("update_settings");
    state.save(&api, &gateway, Instant::now()).await;

    api.failing.lock().unwrap().clear();
    assert!(state.save(&api, &gateway, Instant::now()).await);
    assert_eq!(state.error, None);
}
