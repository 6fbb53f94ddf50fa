//! Per-screen view controllers.
//!
//! DESIGN
//! ======
//! Each screen is a plain state struct whose transitions are `async` methods
//! taking `&mut self`, the `InventoryApi` seam and the `AuthGateway`. Reads
//! land in a `LoadState`; mutations carry a `submitting`/`saving` flag and
//! report failures through an alert string. Front ends render these structs;
//! none of them perform I/O outside the API trait and the gateway.
//!
//! ERROR HANDLING
//! ==============
//! Every failure stops at the view boundary. Detail goes to `tracing`; the
//! state holds only the user-facing message.

pub mod auth;
pub mod dashboard;
pub mod form;
pub mod products;
pub mod route;
pub mod settings;
pub mod view;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use auth::{SigninState, SignupState, logout};
pub use dashboard::{DashboardState, OrganizationHeader};
pub use form::{ProductForm, ValidationError};
pub use products::{ProductRow, ProductsState};
pub use route::Route;
pub use settings::SettingsState;
pub use view::{LoadState, fetch_protected, run_protected};
