use std::convert::Infallible;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderStatus, StatusChange};
use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;

impl Entity for Order {
    type Id = String;
    type CreatePayload = OrderCreate;
    type Patch = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order awaiting seller confirmation.
    ///
    /// The total is fixed here: item subtotals plus the shipping fee.
    fn from_create(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError("order has no items".to_string()));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!("zero quantity for {}", item.product_id)));
        }
        let total_amount = params.items_total().saturating_add(params.shipping_fee);
        let status = OrderStatus::AwaitingConfirmation;
        Ok(Self {
            id,
            buyer: params.buyer,
            status,
            items: params.items,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            shipping_fee: params.shipping_fee,
            total_amount,
            created_at: params.created_at,
            history: vec![StatusChange { status, at: params.created_at }],
            cancel_reason: None,
        })
    }

    /// Orders are immutable apart from their status.
    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        let from = self.status;
        match action {
            OrderAction::Advance { at } => {
                let to = from.next().ok_or(OrderError::InvalidTransition { from, action: "advance" })?;
                self.transition(to, at);
            }
            OrderAction::Cancel { reason, at } => {
                if !from.can_cancel() {
                    return Err(OrderError::InvalidTransition { from, action: "cancel" });
                }
                self.cancel_reason = Some(reason);
                self.transition(OrderStatus::Cancelled, at);
            }
        }
        Ok(OrderActionResult::StatusChanged { from, to: self.status })
    }
}

impl Order {
    fn transition(&mut self, to: OrderStatus, at: chrono::DateTime<chrono::Utc>) {
        self.status = to;
        self.history.push(StatusChange { status: to, at });
    }
}
