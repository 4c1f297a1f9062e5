use thiserror::Error;

use crate::account_actor::AccountError;
use crate::actor_framework::FrameworkError;
use crate::cart_actor::CartError;
use crate::domain::OrderStatus;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("No cart items selected for checkout")]
    EmptySelection,
    #[error("No main shipping address for {0}")]
    MissingAddress(String),
    #[error("Cannot {action} an order that is {from}")]
    InvalidTransition { from: OrderStatus, action: &'static str },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
    #[error("Account error: {0}")]
    Account(#[from] AccountError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<OrderError>> for OrderError {
    fn from(err: FrameworkError<OrderError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
