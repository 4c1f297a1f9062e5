//! Address books and bank account books, one per owner.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
