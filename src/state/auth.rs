//! Sign-in, sign-up, and sign-out flows.
//!
//! DESIGN
//! ======
//! These are the only flows that create or destroy the session. Sign-in
//! stores the token through the gateway and navigates to the dashboard;
//! sign-out clears it and navigates to the sign-in screen.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::form::{ValidationError, require};
use super::route::Route;
use crate::net::InventoryApi;
use crate::net::types::{Credentials, LoginOutcome, Registration};
use crate::session::{AuthGateway, StorageError};

pub const LOGIN_FAILED: &str = "Login failed";
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

// =============================================================================
// SIGN IN
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct SigninState {
    pub email: String,
    pub password: String,
    pub submitting: bool,
    /// Blocking message raised by the last submit.
    pub alert: Option<String>,
}

impl SigninState {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into(), ..Self::default() }
    }

    fn credentials(&self) -> Result<Credentials, ValidationError> {
        Ok(Credentials { email: require("email", &self.email)?, password: require("password", &self.password)? })
    }

    /// Submit the form. Returns the route to navigate to on success.
    pub async fn submit(&mut self, api: &dyn InventoryApi, gateway: &AuthGateway) -> Option<Route> {
        self.alert = None;
        let credentials = match self.credentials() {
            Ok(credentials) => credentials,
            Err(error) => {
                self.alert = Some(error.to_string());
                return None;
            }
        };

        self.submitting = true;
        let result = api.login(&credentials).await;
        self.submitting = false;

        let token = match result {
            Ok(LoginOutcome::Token(token)) => token,
            Ok(LoginOutcome::NoToken) => {
                tracing::warn!("login response carried no token");
                self.alert = Some(AUTHENTICATION_FAILED.to_owned());
                return None;
            }
            Err(error) => {
                tracing::warn!(error = %error, "login failed");
                self.alert = Some(LOGIN_FAILED.to_owned());
                return None;
            }
        };

        if let Err(error) = gateway.login(&token) {
            tracing::error!(error = %error, "failed to persist session token");
            self.alert = Some(LOGIN_FAILED.to_owned());
            return None;
        }
        Some(Route::Dashboard)
    }
}

// =============================================================================
// SIGN UP
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct SignupState {
    pub email: String,
    pub password: String,
    pub organization: String,
    pub submitting: bool,
    /// Server message on success, failure notice otherwise.
    pub alert: Option<String>,
}

impl SignupState {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            organization: organization.into(),
            ..Self::default()
        }
    }

    fn registration(&self) -> Result<Registration, ValidationError> {
        Ok(Registration {
            email: require("email", &self.email)?,
            password: require("password", &self.password)?,
            organization: require("organization", &self.organization)?,
        })
    }

    /// Submit the form. Registration does not start a session; success
    /// navigates to sign-in.
    pub async fn submit(&mut self, api: &dyn InventoryApi) -> Option<Route> {
        self.alert = None;
        let registration = match self.registration() {
            Ok(registration) => registration,
            Err(error) => {
                self.alert = Some(error.to_string());
                return None;
            }
        };

        self.submitting = true;
        let result = api.register(&registration).await;
        self.submitting = false;

        match result {
            Ok(outcome) => {
                self.alert = outcome.message;
                Some(Route::Signin)
            }
            Err(error) => {
                tracing::warn!(error = %error, "registration failed");
                self.alert = Some(REGISTRATION_FAILED.to_owned());
                None
            }
        }
    }
}

// =============================================================================
// SIGN OUT
// =============================================================================

/// End the session and return the route to navigate to.
///
/// # Errors
///
/// Returns an error if the token removal cannot be persisted.
pub fn logout(gateway: &AuthGateway) -> Result<Route, StorageError> {
    gateway.logout()?;
    Ok(Route::Signin)
}
