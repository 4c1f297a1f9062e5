//! Notification feed entity.

pub mod entity;
pub mod error;

pub use error::*;
