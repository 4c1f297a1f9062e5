use crate::domain::{AddOutcome, CartLine, LineKey, Product};

/// Cart reducer steps. Stock figures travel with the action; the cart
/// never looks products up itself.
#[derive(Debug, Clone)]
pub enum CartAction {
    Add {
        product: Product,
        size: Option<String>,
        color: Option<String>,
        quantity: u32,
    },
    SetQuantity {
        key: LineKey,
        quantity: u32,
        stock: u32,
    },
    Remove(LineKey),
    Select {
        key: LineKey,
        selected: bool,
    },
    SelectAll(bool),
    /// Drops lines that were just bought.
    RemoveLines(Vec<LineKey>),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    Added(AddOutcome),
    /// `None` when the quantity was set to zero and the line dropped.
    QuantitySet(Option<CartLine>),
    Removed(CartLine),
    /// Number of selected lines after the change.
    Selection(usize),
    LinesRemoved(usize),
}
