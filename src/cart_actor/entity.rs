use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::Cart;
use super::actions::{CartAction, CartActionResult};
use super::error::CartError;

/// Carts are keyed by their owner and only ever inserted, never created
/// from a payload or patched.
impl Entity for Cart {
    type Id = String;
    type CreatePayload = Infallible;
    type Patch = Infallible;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Error = CartError;

    fn id(&self) -> &String { &self.owner }

    fn from_create(_id: String, payload: Infallible) -> Result<Self, CartError> {
        match payload {}
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), CartError> {
        match patch {}
    }

    fn handle_action(&mut self, action: CartAction) -> Result<CartActionResult, CartError> {
        match action {
            CartAction::Add { product, size, color, quantity } => self
                .add(&product, size.as_deref(), color.as_deref(), quantity)
                .map(CartActionResult::Added),
            CartAction::SetQuantity { key, quantity, stock } => {
                self.set_quantity(&key, quantity, stock).map(CartActionResult::QuantitySet)
            }
            CartAction::Remove(key) => self.remove(&key).map(CartActionResult::Removed),
            CartAction::Select { key, selected } => {
                self.select(&key, selected)?;
                Ok(CartActionResult::Selection(self.selected_lines().count()))
            }
            CartAction::SelectAll(selected) => Ok(CartActionResult::Selection(self.select_all(selected))),
            CartAction::RemoveLines(keys) => Ok(CartActionResult::LinesRemoved(self.remove_lines(&keys))),
            CartAction::Clear => Ok(CartActionResult::LinesRemoved(self.clear())),
        }
    }
}
