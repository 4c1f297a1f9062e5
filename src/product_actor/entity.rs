use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};
use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;

/// Highest flash sale discount a product accepts.
pub const MAX_DISCOUNT_PERCENT: u8 = 90;

impl Entity for Product {
    type Id = String;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Error = ProductError;

    fn id(&self) -> &String { &self.id }

    /// Creates a new listing. Ratings start empty and no discount applies.
    fn from_create(id: String, params: ProductCreate) -> Result<Self, ProductError> {
        let product = Self {
            id,
            name: params.name.trim().to_string(),
            category: params.category.trim().to_string(),
            description: params.description,
            price: params.price,
            stock: params.stock,
            images: params.images,
            rating: 0.0,
            reviews_count: 0,
            sizes: params.sizes,
            colors: params.colors,
            discount_percent: None,
        };
        validate(&product)?;
        Ok(product)
    }

    /// Applies a seller edit. Fields left as `None` are untouched.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), ProductError> {
        if let Some(name) = patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = patch.category {
            self.category = category.trim().to_string();
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock {
            self.stock = stock;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(sizes) = patch.sizes {
            self.sizes = sizes;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        validate(self)
    }

    /// Handles product-specific actions.
    ///
    /// # Errors
    /// Reserving more than the available stock, a zero quantity, a discount
    /// outside 1..=90 percent, or a review outside 1..=5 stars.
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.stock)),
            ProductAction::ReserveStock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                if self.stock < amount {
                    return Err(ProductError::InsufficientStock {
                        requested: amount,
                        available: self.stock,
                    });
                }
                self.stock -= amount;
                Ok(ProductActionResult::Reserved { remaining: self.stock })
            }
            ProductAction::RestoreStock(amount) => {
                if amount == 0 {
                    return Err(ProductError::InvalidQuantity(amount));
                }
                self.stock = self.stock.saturating_add(amount);
                Ok(ProductActionResult::Restored { stock: self.stock })
            }
            ProductAction::SetDiscount(discount) => {
                if let Some(percent) = discount {
                    if percent == 0 || percent > MAX_DISCOUNT_PERCENT {
                        return Err(ProductError::ValidationError(format!(
                            "discount must be between 1 and {}%, got {}%",
                            MAX_DISCOUNT_PERCENT, percent
                        )));
                    }
                }
                self.discount_percent = discount;
                Ok(ProductActionResult::DiscountSet(discount))
            }
            ProductAction::AddReview(stars) => {
                if !(1..=5).contains(&stars) {
                    return Err(ProductError::ValidationError(format!("rating must be 1 to 5 stars, got {}", stars)));
                }
                let total = self.rating * self.reviews_count as f32 + f32::from(stars);
                self.reviews_count += 1;
                self.rating = total / self.reviews_count as f32;
                Ok(ProductActionResult::Reviewed {
                    rating: self.rating,
                    reviews_count: self.reviews_count,
                })
            }
        }
    }
}

fn validate(product: &Product) -> Result<(), ProductError> {
    if product.name.is_empty() {
        return Err(ProductError::ValidationError("name is required".to_string()));
    }
    if product.category.is_empty() {
        return Err(ProductError::ValidationError("category is required".to_string()));
    }
    if product.price == 0 {
        return Err(ProductError::ValidationError("price must be greater than zero".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(stock: u32) -> Product {
        let params = ProductCreate {
            name: " Celana Kulot ".into(),
            category: "Bawahan".into(),
            price: 175_000,
            stock,
            ..Default::default()
        };
        Product::from_create("product_1".into(), params).unwrap()
    }

    #[test]
    fn test_from_create_trims_and_validates() {
        let product = create(3);
        assert_eq!(product.name, "Celana Kulot");
        assert_eq!(product.reviews_count, 0);

        let err = Product::from_create("product_2".into(), ProductCreate::default()).unwrap_err();
        assert_eq!(err, ProductError::ValidationError("name is required".into()));
    }

    #[test]
    fn test_patch_is_validated() {
        let mut product = create(3);
        let patch = ProductPatch { price: Some(0), ..Default::default() };
        assert!(product.on_update(patch).is_err());
    }

    #[test]
    fn test_reserve_and_restore_stock() {
        let mut product = create(3);
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)).unwrap(),
            ProductActionResult::Reserved { remaining: 1 }
        );
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(2)).unwrap_err(),
            ProductError::InsufficientStock { requested: 2, available: 1 }
        );
        assert_eq!(
            product.handle_action(ProductAction::RestoreStock(2)).unwrap(),
            ProductActionResult::Restored { stock: 3 }
        );
        assert_eq!(
            product.handle_action(ProductAction::ReserveStock(0)).unwrap_err(),
            ProductError::InvalidQuantity(0)
        );
    }

    #[test]
    fn test_reviews_keep_running_average() {
        let mut product = create(1);
        product.handle_action(ProductAction::AddReview(5)).unwrap();
        let result = product.handle_action(ProductAction::AddReview(4)).unwrap();
        assert_eq!(result, ProductActionResult::Reviewed { rating: 4.5, reviews_count: 2 });
        assert!(product.handle_action(ProductAction::AddReview(6)).is_err());
    }

    #[test]
    fn test_discount_bounds() {
        let mut product = create(1);
        assert!(product.handle_action(ProductAction::SetDiscount(Some(95))).is_err());
        product.handle_action(ProductAction::SetDiscount(Some(20))).unwrap();
        assert_eq!(product.effective_price(), 140_000);
        product.handle_action(ProductAction::SetDiscount(None)).unwrap();
        assert_eq!(product.effective_price(), 175_000);
    }
}
