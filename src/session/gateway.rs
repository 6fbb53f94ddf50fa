//! Auth gateway: the session context every network-calling view receives.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never touch storage directly. They ask the gateway for a
//! `SessionToken`; without one they stop before building a request. The
//! token is then handed to the HTTP layer explicitly, which is the only place
//! the bearer header is attached.

#[cfg(test)]
#[path = "gateway_test.rs"]
mod gateway_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use super::storage::{MemoryStorage, Storage, StorageError};
use super::store::TokenStore;

/// Header name/value pairs to attach to an outbound request.
pub type AuthHeaders = BTreeMap<&'static str, String>;

/// An opaque bearer credential. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Bearer <token>`.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken(..)")
    }
}

/// Empty without a token, otherwise exactly one `Authorization` entry.
#[must_use]
pub fn bearer_headers(token: Option<&SessionToken>) -> AuthHeaders {
    let mut headers = AuthHeaders::new();
    if let Some(token) = token {
        headers.insert("Authorization", token.bearer());
    }
    headers
}

/// Session context shared by all views. Cloning shares the token.
#[derive(Clone, Debug)]
pub struct AuthGateway {
    store: TokenStore,
}

impl AuthGateway {
    #[must_use]
    pub fn new(store: TokenStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self::new(TokenStore::new(storage))
    }

    /// Gateway over a fresh process-local store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(MemoryStorage::new()))
    }

    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        self.store.get().map(SessionToken)
    }

    /// Persist a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot persist it.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.store.set(token)
    }

    /// Clear the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot persist the removal.
    pub fn remove_token(&self) -> Result<(), StorageError> {
        self.store.remove()
    }

    /// Start a session with the token returned by a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot persist it.
    pub fn login(&self, token: &SessionToken) -> Result<(), StorageError> {
        tracing::info!("session started");
        self.store.set(token.as_str())
    }

    /// End the session. Identical to [`AuthGateway::remove_token`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot persist the removal.
    pub fn logout(&self) -> Result<(), StorageError> {
        tracing::info!("session ended");
        self.remove_token()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    #[must_use]
    pub fn auth_headers(&self) -> AuthHeaders {
        bearer_headers(self.token().as_ref())
    }
}
