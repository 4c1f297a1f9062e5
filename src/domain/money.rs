//! Rupiah amounts. Every price in the store is a whole number of rupiah.

/// Formats an amount the way the storefront shows it, e.g. `Rp150.000`.
pub fn format_rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp{}", grouped)
}

/// Price after a percentage discount, rounded down to whole rupiah.
pub fn apply_discount(price: u64, percent: u8) -> u64 {
    let kept = u128::from(100 - percent.min(100));
    // At most `price`, so the narrowing cannot truncate.
    (u128::from(price) * kept / 100) as u64
}
