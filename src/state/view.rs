//! Load-state machine and the authenticated request pattern.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every view follows the same shape: ask the gateway for a token, stop in
//! `Unauthenticated` when there is none, otherwise hand the token to the API
//! and turn the result into `Ready` or `Failed`. `run_protected` and
//! `fetch_protected` are that shape, so no view builds a protected request
//! on its own.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use std::future::Future;

use crate::net::ApiError;
use crate::session::{AuthGateway, SessionToken};

/// Banner shown when a view has no session.
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Read-side state of a view.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Loading,
    Ready(T),
    /// No token was present; no request was sent.
    Unauthenticated,
    /// Request failed; holds the user-facing message.
    Failed(String),
}

impl<T> LoadState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Inline error banner text, if the view should show one.
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Unauthenticated => Some(NOT_AUTHENTICATED),
            Self::Failed(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Run `request` with the current session token.
///
/// # Errors
///
/// Returns `ApiError::Unauthenticated` without calling `request` when no
/// token is present; otherwise whatever `request` returns.
pub async fn run_protected<T, F, Fut>(gateway: &AuthGateway, request: F) -> Result<T, ApiError>
where
    F: FnOnce(SessionToken) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let Some(token) = gateway.token() else {
        tracing::debug!("protected request skipped: no session token");
        return Err(ApiError::Unauthenticated);
    };
    request(token).await
}

/// Run a protected read and fold the outcome into a `LoadState`.
///
/// Failures are logged with their detail; the state only carries `failure`.
pub async fn fetch_protected<T, F, Fut>(gateway: &AuthGateway, failure: &str, request: F) -> LoadState<T>
where
    F: FnOnce(SessionToken) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    match run_protected(gateway, request).await {
        Ok(value) => LoadState::Ready(value),
        Err(error) if error.is_unauthenticated() => LoadState::Unauthenticated,
        Err(error) => {
            tracing::warn!(error = %error, "{failure}");
            LoadState::Failed(failure.to_owned())
        }
    }
}
