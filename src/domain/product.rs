use serde::{Deserialize, Serialize};

use super::money::apply_discount;

/// Represents a product listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    /// Base price in rupiah.
    pub price: u64,
    pub stock: u32,
    pub images: Vec<String>,
    pub rating: f32,
    pub reviews_count: u32,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Flash sale discount currently applied, if any.
    pub discount_percent: Option<u8>,
}

/// Payload for listing a new product.
///
/// Also the shape of the seller's locally cached draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

/// Payload for editing an existing product.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}

/// Catalog filter used by the storefront listing.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    pub in_stock_only: bool,
}

impl Product {
    /// Price the buyer pays right now.
    pub fn effective_price(&self) -> u64 {
        match self.discount_percent {
            Some(percent) => apply_discount(self.price, percent),
            None => self.price,
        }
    }

    /// Whether the size/color combination is one this product sells.
    ///
    /// Products without sizes (or colors) accept no size (or color).
    pub fn offers(&self, size: Option<&str>, color: Option<&str>) -> bool {
        variant_matches(&self.sizes, size) && variant_matches(&self.colors, color)
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn matches(&self, query: &ProductQuery) -> bool {
        if let Some(category) = &query.category {
            if !self.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(search) = &query.search {
            if !self.name.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        !query.in_stock_only || self.is_in_stock()
    }
}

fn variant_matches(options: &[String], chosen: Option<&str>) -> bool {
    match chosen {
        Some(value) => options.iter().any(|option| option == value),
        None => options.is_empty(),
    }
}
