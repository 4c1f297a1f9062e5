/// Custom actions for Product entities.
///
/// These actions represent catalog operations that go beyond seller CRUD.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes stock for a checkout.
    ///
    /// # Errors
    /// Fails if the requested amount exceeds available stock.
    ReserveStock(u32),
    /// Returns stock from a cancelled order or an aborted checkout.
    RestoreStock(u32),
    /// Sets or clears the flash sale discount (percent).
    SetDiscount(Option<u8>),
    /// Records a buyer review of 1 to 5 stars.
    AddReview(u8),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reserved { remaining: u32 },
    Restored { stock: u32 },
    DiscountSet(Option<u8>),
    Reviewed { rating: f32, reviews_count: u32 },
}
