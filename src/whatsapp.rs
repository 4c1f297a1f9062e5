//! `wa.me` deep links that open a WhatsApp chat with a prefilled message.

use std::fmt::Write;

use thiserror::Error;

use crate::domain::{format_rupiah, Order, Product};

const COUNTRY_CODE: &str = "62";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum WhatsAppError {
    #[error("Phone number contains invalid characters: {0}")]
    InvalidCharacters(String),
    #[error("Phone number must have 10 to 15 digits: {0}")]
    InvalidLength(String),
}

/// International digits-only form of an Indonesian phone number.
///
/// `0812-3456-7890`, `+62 812 3456 7890` and `(62)81234567890` all become `6281234567890`.
pub fn normalize_phone(raw: &str) -> Result<String, WhatsAppError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = trimmed
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(WhatsAppError::InvalidCharacters(raw.to_string()));
    }
    let international = match digits.strip_prefix('0') {
        Some(local) => format!("{}{}", COUNTRY_CODE, local),
        None => digits,
    };
    if !(10..=15).contains(&international.len()) {
        return Err(WhatsAppError::InvalidLength(raw.to_string()));
    }
    Ok(international)
}

pub fn chat_link(phone: &str, message: &str) -> Result<String, WhatsAppError> {
    let number = normalize_phone(phone)?;
    Ok(format!("https://wa.me/{}?text={}", number, percent_encode(message)))
}

/// Message a buyer sends the seller about an order.
pub fn order_message(order: &Order) -> String {
    let mut message = format!("Halo, saya ingin menanyakan pesanan {} ({}).\n", order.id, order.status);
    for item in &order.items {
        let variant: Vec<&str> = item.size.iter().chain(item.color.iter()).map(String::as_str).collect();
        let _ = write!(message, "- {} x{}", item.name, item.quantity);
        if !variant.is_empty() {
            let _ = write!(message, " ({})", variant.join(", "));
        }
        message.push('\n');
    }
    let _ = write!(message, "Total: {}", format_rupiah(order.total_amount));
    message
}

/// Message asking the seller about a product.
pub fn product_message(product: &Product) -> String {
    format!(
        "Halo, apakah {} masih tersedia? Harga {}.",
        product.name,
        format_rupiah(product.effective_price())
    )
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => encoded.push(byte as char),
            _ => {
                let _ = write!(encoded, "%{:02X}", byte);
            }
        }
    }
    encoded
}
