//! Session token persistence under a fixed storage key.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use super::storage::{Storage, StorageError};

/// Storage key holding the session token.
pub const TOKEN_KEY: &str = "auth_token";

/// The single owner of the persisted session token.
///
/// Clones share the same backend, so every view observes the same token.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Persist `token`, replacing any previous one. Contents are not validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the value.
    pub fn set(&self, token: &str) -> Result<(), StorageError> {
        self.storage.set_item(TOKEN_KEY, token)
    }

    /// Current token, or `None` when absent. An empty value counts as absent.
    #[must_use]
    pub fn get(&self) -> Option<String> {
        self.storage
            .get_item(TOKEN_KEY)
            .filter(|token| !token.is_empty())
    }

    /// Clear the token.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot persist the removal.
    pub fn remove(&self) -> Result<(), StorageError> {
        self.storage.remove_item(TOKEN_KEY)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
