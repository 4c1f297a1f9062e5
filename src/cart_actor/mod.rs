//! Shopping cart entity, one per buyer.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
