use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};
use crate::domain::{Product, ProductCreate, ProductPatch, ProductQuery};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::actor_framework::{id_sequence, Filter, ResourceClient};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let filter: Filter<Product> = Box::new(move |product: &Product| product.matches(&query));
        let mut products = self.inner.list(Some(filter)).await?;
        products.sort_by_key(|product| id_sequence(&product.id));
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: String, patch: ProductPatch) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::StockLevel(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock and returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await? {
            ProductActionResult::Reserved { remaining } => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn restore_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::RestoreStock(quantity)).await? {
            ProductActionResult::Restored { stock } => Ok(stock),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_discount(&self, id: String, percent: Option<u8>) -> Result<(), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetDiscount(percent)).await? {
            ProductActionResult::DiscountSet(_) => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the new average rating and review count.
    #[instrument(skip(self))]
    pub async fn add_review(&self, id: String, stars: u8) -> Result<(f32, u32), ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::AddReview(stars)).await? {
            ProductActionResult::Reviewed { rating, reviews_count } => Ok((rating, reviews_count)),
            other => Err(unexpected(other)),
        }
    }

    /// Applies every discount or none: on failure the ones already set are cleared again.
    #[instrument(skip(self, discounts), fields(products = discounts.len()))]
    pub async fn apply_discounts(&self, discounts: &BTreeMap<String, u8>) -> Result<(), ProductError> {
        let mut applied = Vec::with_capacity(discounts.len());
        for (id, percent) in discounts {
            if let Err(e) = self.set_discount(id.clone(), Some(*percent)).await {
                warn!(error = %e, product_id = %id, "Discount rejected, clearing the ones already set");
                if let Err(cleanup) = self.clear_discounts(applied).await {
                    warn!(error = %cleanup, "Could not clear applied discounts");
                }
                return Err(e);
            }
            applied.push(id.clone());
        }
        Ok(())
    }

    /// Removes discounts. Products deleted in the meantime are skipped.
    #[instrument(skip(self, ids))]
    pub async fn clear_discounts<I>(&self, ids: I) -> Result<(), ProductError>
    where
        I: IntoIterator<Item = String>,
    {
        for id in ids {
            match self.set_discount(id, None).await {
                Ok(()) | Err(ProductError::NotFound(_)) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}
