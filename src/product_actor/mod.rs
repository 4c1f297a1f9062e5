//! Catalog entity: seller CRUD, stock reservation and review actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
