use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while editing a cart.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Product not found: {0}")]
    ProductNotFound(String),
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Variant not offered for {product_id}: size {size:?}, color {color:?}")]
    InvalidVariant {
        product_id: String,
        size: Option<String>,
        color: Option<String>,
    },
    #[error("Cart line not found for product: {0}")]
    LineNotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError<CartError>> for CartError {
    fn from(err: FrameworkError<CartError>) -> Self {
        match err {
            FrameworkError::Entity(e) => e,
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
