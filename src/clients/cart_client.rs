use tracing::{debug, error, info, instrument};
use crate::actor_framework::ResourceClient;
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::ProductClient;
use crate::domain::{AddOutcome, Cart, CartLine, LineKey, Product};

/// Client for the cart actor.
///
/// Looks products up through the catalog so the cart reducer always sees the
/// current stock at mutation time.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    product_client: ProductClient,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, product_client: ProductClient) -> Self {
        Self { inner, product_client }
    }

    /// The owner's cart; an empty one if nothing was ever added.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, owner: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        let cart = self.inner.get(owner.clone()).await?;
        Ok(cart.unwrap_or_else(|| Cart::new(owner)))
    }

    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        owner: String,
        product_id: String,
        size: Option<String>,
        color: Option<String>,
        quantity: u32,
    ) -> Result<AddOutcome, CartError> {
        debug!("Sending request");
        let product = self.load_product(&product_id).await?;
        let action = CartAction::Add { product, size, color, quantity };
        match self.act(owner, action).await? {
            CartActionResult::Added(outcome) => {
                if outcome.capped {
                    info!(quantity = outcome.quantity, "Quantity capped at available stock");
                }
                Ok(outcome)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Sets a line's quantity against the product's current stock. Zero removes the line.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, owner: String, key: LineKey, quantity: u32) -> Result<Option<CartLine>, CartError> {
        debug!("Sending request");
        let stock = if quantity == 0 {
            0
        } else {
            self.load_product(&key.product_id).await?.stock
        };
        match self.act(owner, CartAction::SetQuantity { key, quantity, stock }).await? {
            CartActionResult::QuantitySet(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_item(&self, owner: String, key: LineKey) -> Result<CartLine, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::Remove(key)).await? {
            CartActionResult::Removed(line) => Ok(line),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the number of selected lines afterwards.
    #[instrument(skip(self))]
    pub async fn select(&self, owner: String, key: LineKey, selected: bool) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::Select { key, selected }).await? {
            CartActionResult::Selection(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn select_all(&self, owner: String, selected: bool) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::SelectAll(selected)).await? {
            CartActionResult::Selection(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_lines(&self, owner: String, keys: Vec<LineKey>) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::RemoveLines(keys)).await? {
            CartActionResult::LinesRemoved(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, owner: String) -> Result<usize, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::Clear).await? {
            CartActionResult::LinesRemoved(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    async fn act(&self, owner: String, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner.ensure(Cart::new(owner.clone())).await?;
        Ok(self.inner.perform_action(owner, action).await?)
    }

    async fn load_product(&self, product_id: &str) -> Result<Product, CartError> {
        match self.product_client.get_product(product_id.to_string()).await {
            Ok(Some(product)) => Ok(product),
            Ok(None) => {
                error!(product_id, "Product not found");
                Err(CartError::ProductNotFound(product_id.to_string()))
            }
            Err(e) => {
                error!(error = %e, "Product lookup failed");
                Err(CartError::ActorCommunicationError(format!("Product lookup failed: {}", e)))
            }
        }
    }
}

fn unexpected(result: CartActionResult) -> CartError {
    CartError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}
