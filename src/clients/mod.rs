//! Typed clients over the repository actors.

#[macro_use]
mod macros;

mod account_client;
mod cart_client;
mod notification_client;
mod order_client;
mod product_client;

pub use account_client::AccountClient;
pub use cart_client::CartClient;
pub use notification_client::NotificationClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
