use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::cart_actor::CartError;

/// Identity of a cart line: the same product in another size or color is a separate line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl LineKey {
    pub fn new(product_id: impl Into<String>, size: Option<&str>, color: Option<&str>) -> Self {
        Self {
            product_id: product_id.into(),
            size: size.map(str::to_owned),
            color: color.map(str::to_owned),
        }
    }
}

/// One product variant in a cart, with the product fields shown in the cart view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub image: Option<String>,
    pub price: u64,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    /// Selected lines are the ones checkout will buy.
    pub selected: bool,
}

impl CartLine {
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            size: self.size.clone(),
            color: self.color.clone(),
        }
    }

    fn is(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }

    fn refresh_from(&mut self, product: &Product) {
        self.name = product.name.clone();
        self.image = product.images.first().cloned();
        self.price = product.effective_price();
    }
}

/// Result of adding to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    /// Quantity of the line after the add.
    pub quantity: u32,
    /// True when the requested amount was cut down to the available stock.
    pub capped: bool,
}

/// A buyer's shopping cart, keyed by the buyer's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub owner: String,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            lines: Vec::new(),
        }
    }

    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.is(key))
    }

    /// Adds `quantity` of a product variant, merging with an existing line.
    ///
    /// The merged quantity never exceeds the product's stock at the time of the call.
    pub fn add(
        &mut self,
        product: &Product,
        size: Option<&str>,
        color: Option<&str>,
        quantity: u32,
    ) -> Result<AddOutcome, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if !product.offers(size, color) {
            return Err(CartError::InvalidVariant {
                product_id: product.id.clone(),
                size: size.map(str::to_owned),
                color: color.map(str::to_owned),
            });
        }
        if product.stock == 0 {
            return Err(CartError::OutOfStock(product.id.clone()));
        }

        let key = LineKey::new(product.id.as_str(), size, color);
        if let Some(line) = self.lines.iter_mut().find(|line| line.is(&key)) {
            if line.quantity >= product.stock {
                return Err(CartError::InsufficientStock {
                    requested: line.quantity.saturating_add(quantity),
                    available: product.stock,
                });
            }
            let wanted = line.quantity.saturating_add(quantity);
            line.quantity = wanted.min(product.stock);
            line.selected = true;
            line.refresh_from(product);
            return Ok(AddOutcome {
                quantity: line.quantity,
                capped: wanted > product.stock,
            });
        }

        let mut line = CartLine {
            product_id: product.id.clone(),
            name: String::new(),
            image: None,
            price: 0,
            size: key.size,
            color: key.color,
            quantity: quantity.min(product.stock),
            selected: true,
        };
        line.refresh_from(product);
        let outcome = AddOutcome {
            quantity: line.quantity,
            capped: quantity > product.stock,
        };
        self.lines.push(line);
        Ok(outcome)
    }

    /// Sets a line's quantity against the given stock. Zero removes the line.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: u32, stock: u32) -> Result<Option<CartLine>, CartError> {
        let index = self.position(key)?;
        if quantity == 0 {
            self.lines.remove(index);
            return Ok(None);
        }
        if quantity > stock {
            return Err(CartError::InsufficientStock {
                requested: quantity,
                available: stock,
            });
        }
        let line = &mut self.lines[index];
        line.quantity = quantity;
        Ok(Some(line.clone()))
    }

    pub fn remove(&mut self, key: &LineKey) -> Result<CartLine, CartError> {
        let index = self.position(key)?;
        Ok(self.lines.remove(index))
    }

    pub fn select(&mut self, key: &LineKey, selected: bool) -> Result<(), CartError> {
        let index = self.position(key)?;
        self.lines[index].selected = selected;
        Ok(())
    }

    /// Returns how many lines are selected afterwards.
    pub fn select_all(&mut self, selected: bool) -> usize {
        for line in &mut self.lines {
            line.selected = selected;
        }
        self.selected_lines().count()
    }

    /// Drops the given lines; unknown keys are ignored. Returns the number removed.
    pub fn remove_lines(&mut self, keys: &[LineKey]) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !keys.iter().any(|key| line.is(key)));
        before - self.lines.len()
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.lines.len();
        self.lines.clear();
        removed
    }

    pub fn selected_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|line| line.selected)
    }

    pub fn selected_subtotal(&self) -> u64 {
        self.selected_lines().map(CartLine::subtotal).fold(0, u64::saturating_add)
    }

    /// Total number of pieces, as shown on the cart badge.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    fn position(&self, key: &LineKey) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|line| line.is(key))
            .ok_or_else(|| CartError::LineNotFound(key.product_id.clone()))
    }
}
