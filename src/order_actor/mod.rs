//! Order entity: creation from a checkout snapshot and seller-driven status changes.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
