//! Invento: client core for a multi-tenant inventory dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! A single bearer token governs access to every protected screen. The
//! `session` layer owns that token, `net` speaks to the REST backend, and
//! `state` holds the per-screen view controllers that a front end (the
//! `invento` CLI in `cli/`) drives.
//!
//! DESIGN
//! ======
//! Protected API calls take a `SessionToken` argument, and the only way to
//! obtain one inside a view is `state::run_protected`, which stops with
//! `ApiError::Unauthenticated` before any I/O when the session is empty.

pub mod config;
pub mod net;
pub mod session;
pub mod state;
pub mod util;

pub use config::{ClientConfig, ConfigError};
pub use net::{ApiError, HttpApi, InventoryApi};
pub use session::{AuthGateway, FileStorage, SessionToken};
