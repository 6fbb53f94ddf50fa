//! Session credential lifecycle.
//!
//! DESIGN
//! ======
//! Three layers, leaves first:
//! - `storage`: a string key/value backend (memory or JSON file), the analog
//!   of browser-local storage.
//! - `store`: the session token under the fixed `auth_token` key.
//! - `gateway`: the session context handed to every network-calling view.
//!
//! Only `TokenStore` writes the token key. Everything else goes through
//! `AuthGateway`.

pub mod gateway;
pub mod storage;
pub mod store;

pub use gateway::{AuthGateway, AuthHeaders, SessionToken, bearer_headers};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{TOKEN_KEY, TokenStore};
