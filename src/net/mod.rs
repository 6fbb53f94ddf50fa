//! Network layer: wire types, errors, and the REST client.

pub mod api;
pub mod error;
pub mod types;

pub use api::{HttpApi, InventoryApi};
pub use error::{ApiError, ErrorKind};
