//! On-device persistence: a JSON key/value file and the typed preferences kept in it.

pub mod local_store;
pub mod preferences;

pub use local_store::*;
pub use preferences::*;
