use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::Address;

/// Order lifecycle. The seller moves an order forward one step at a time;
/// `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Menunggu Konfirmasi")]
    AwaitingConfirmation,
    #[serde(rename = "Diproses")]
    Processing,
    #[serde(rename = "Dikirim")]
    Shipped,
    #[serde(rename = "Selesai")]
    Completed,
    #[serde(rename = "Dibatalkan")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::AwaitingConfirmation,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Label shown to buyers and sellers.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::AwaitingConfirmation => "Menunggu Konfirmasi",
            OrderStatus::Processing => "Diproses",
            OrderStatus::Shipped => "Dikirim",
            OrderStatus::Completed => "Selesai",
            OrderStatus::Cancelled => "Dibatalkan",
        }
    }

    /// The status a seller advance moves to.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::AwaitingConfirmation => Some(OrderStatus::Processing),
            OrderStatus::Processing => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Orders can be cancelled until they leave the seller.
    pub fn can_cancel(self) -> bool {
        matches!(self, OrderStatus::AwaitingConfirmation | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown order status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    BankTransfer,
    CashOnDelivery,
    EWallet,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Transfer Bank",
            PaymentMethod::CashOnDelivery => "COD",
            PaymentMethod::EWallet => "E-Wallet",
        }
    }
}

/// Product fields frozen at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub name: String,
    pub image: Option<String>,
    /// Unit price actually charged.
    pub price: u64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
}

impl OrderItem {
    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
}

/// Represents a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_fee: u64,
    pub total_amount: u64,
    pub created_at: DateTime<Utc>,
    pub history: Vec<StatusChange>,
    pub cancel_reason: Option<String>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub shipping_fee: u64,
    pub created_at: DateTime<Utc>,
}

impl OrderCreate {
    pub fn items_total(&self) -> u64 {
        self.items.iter().map(OrderItem::subtotal).fold(0, u64::saturating_add)
    }
}

/// Order listing filter.
#[derive(Debug, Clone, Default)]
pub struct OrderQuery {
    pub buyer: Option<String>,
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn matches(&self, query: &OrderQuery) -> bool {
        query.buyer.as_ref().map_or(true, |buyer| &self.buyer == buyer)
            && query.status.map_or(true, |status| self.status == status)
    }
}
