//! Small pure helpers shared across views.

pub mod stock;
