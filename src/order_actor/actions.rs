use chrono::{DateTime, Utc};

use crate::domain::OrderStatus;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order one step along its lifecycle.
    Advance { at: DateTime<Utc> },
    /// Stops the order before it ships.
    Cancel { reason: String, at: DateTime<Utc> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderActionResult {
    StatusChanged { from: OrderStatus, to: OrderStatus },
}
