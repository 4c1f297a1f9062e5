use std::cmp::Reverse;

use chrono::Utc;
use tracing::{error, info, instrument, warn};
use crate::actor_framework::{id_sequence, Filter, ResourceClient};
use crate::clients::{AccountClient, CartClient, NotificationClient, ProductClient};
use crate::domain::{
    format_rupiah, CartLine, NotificationCreate, Order, OrderCreate, OrderItem, OrderQuery, OrderStatus,
    PaymentMethod,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::product_actor::ProductError;

/// Client for interacting with the Order actor.
///
/// This client handles the checkout orchestration: it reads the cart and the
/// main address, reserves stock in the catalog, and only then records the order.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    product_client: ProductClient,
    cart_client: CartClient,
    account_client: AccountClient,
    notification_client: NotificationClient,
    shipping_fee: u64,
}

impl_client_get!(OrderClient, Order, OrderError, order);

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        product_client: ProductClient,
        cart_client: CartClient,
        account_client: AccountClient,
        notification_client: NotificationClient,
        shipping_fee: u64,
    ) -> Self {
        Self {
            inner,
            product_client,
            cart_client,
            account_client,
            notification_client,
            shipping_fee,
        }
    }

    /// Buys every selected line of the buyer's cart.
    #[instrument(skip(self))]
    pub async fn checkout(&self, buyer: String, payment_method: PaymentMethod) -> Result<Order, OrderError> {
        info!("Processing checkout request");

        // Step 1: Selected cart lines
        let cart = self.cart_client.get_cart(buyer.clone()).await?;
        let lines: Vec<CartLine> = cart.selected_lines().cloned().collect();
        if lines.is_empty() {
            error!("Nothing selected for checkout");
            return Err(OrderError::EmptySelection);
        }

        // Step 2: Shipping address
        let shipping_address = match self.account_client.main_address(buyer.clone()).await? {
            Some(address) => address,
            None => {
                error!("Buyer has no main address");
                return Err(OrderError::MissingAddress(buyer));
            }
        };

        // Step 3: Validate products and reserve stock, undoing on failure
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            match self.reserve_line(line).await {
                Ok(item) => items.push(item),
                Err(e) => {
                    self.release(&items).await;
                    return Err(e);
                }
            }
        }
        info!(lines = items.len(), "Stock reserved successfully");

        // Step 4: Create order
        let payload = OrderCreate {
            buyer: buyer.clone(),
            items,
            shipping_address,
            payment_method,
            shipping_fee: self.shipping_fee,
            created_at: Utc::now(),
        };
        let reserved = payload.items.clone();
        let order_id = match self.inner.create(payload).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Order creation failed");
                self.release(&reserved).await;
                return Err(e.into());
            }
        };
        let order = self.load(&order_id).await?;
        info!(order_id = %order.id, total = order.total_amount, "Order created successfully");

        // Step 5: Clear purchased lines and tell the buyer
        let keys = lines.iter().map(CartLine::key).collect();
        if let Err(e) = self.cart_client.remove_lines(buyer.clone(), keys).await {
            warn!(error = %e, "Could not remove purchased lines from cart");
        }
        self.notify(
            &order,
            "Pesanan dibuat",
            format!(
                "Pesanan {} sebesar {} menunggu konfirmasi penjual.",
                order.id,
                format_rupiah(order.total_amount)
            ),
        )
        .await;

        Ok(order)
    }

    /// Seller action: move the order one status forward.
    #[instrument(skip(self))]
    pub async fn advance_order(&self, id: String) -> Result<Order, OrderError> {
        info!("Processing advance_order request");
        let action = OrderAction::Advance { at: Utc::now() };
        let OrderActionResult::StatusChanged { from, to } = self.inner.perform_action(id.clone(), action).await?;
        info!(%from, %to, "Order status advanced");

        let order = self.load(&id).await?;
        self.notify(&order, "Status pesanan diperbarui", format!("Pesanan {} sekarang {}.", order.id, to))
            .await;
        Ok(order)
    }

    /// Cancels an order that has not shipped and puts its items back in stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, id: String, reason: String) -> Result<Order, OrderError> {
        info!("Processing cancel_order request");
        let action = OrderAction::Cancel { reason: reason.clone(), at: Utc::now() };
        let OrderActionResult::StatusChanged { from, .. } = self.inner.perform_action(id.clone(), action).await?;
        info!(%from, "Order cancelled");

        let order = self.load(&id).await?;
        self.release(&order.items).await;
        self.notify(&order, "Pesanan dibatalkan", format!("Pesanan {} dibatalkan: {}.", order.id, reason))
            .await;
        Ok(order)
    }

    /// Orders matching the query, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, query: OrderQuery) -> Result<Vec<Order>, OrderError> {
        let filter: Filter<Order> = Box::new(move |order: &Order| order.matches(&query));
        let mut orders = self.inner.list(Some(filter)).await?;
        orders.sort_by_key(|order| Reverse(id_sequence(&order.id)));
        Ok(orders)
    }

    /// Orders in a given status, for the seller dashboard.
    pub async fn orders_in(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        self.list_orders(OrderQuery { buyer: None, status: Some(status) }).await
    }

    async fn reserve_line(&self, line: &CartLine) -> Result<OrderItem, OrderError> {
        let product = match self.product_client.get_product(line.product_id.clone()).await {
            Ok(Some(product)) => {
                info!(product_name = %product.name, "Product validation successful");
                product
            }
            Ok(None) => {
                error!(product_id = %line.product_id, "Product not found");
                return Err(OrderError::InvalidProduct(line.product_id.clone()));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(OrderError::InvalidProduct(format!("Product validation failed: {}", e)));
            }
        };

        match self.product_client.reserve_stock(product.id.clone(), line.quantity).await {
            Ok(_) => {}
            Err(ProductError::NotFound(_)) => {
                error!(product_id = %product.id, "Product deleted before its stock was reserved");
                return Err(OrderError::InvalidProduct(product.id.clone()));
            }
            Err(e) => {
                error!(error = %e, product_id = %product.id, "Stock reservation failed");
                return Err(OrderError::InsufficientStock(format!("{}: {}", product.name, e)));
            }
        }

        Ok(OrderItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            image: product.images.first().cloned(),
            price: product.effective_price(),
            size: line.size.clone(),
            color: line.color.clone(),
            quantity: line.quantity,
        })
    }

    /// Puts reserved quantities back. Failures are logged; the products may have been deleted.
    async fn release(&self, items: &[OrderItem]) {
        for item in items {
            if let Err(e) = self.product_client.restore_stock(item.product_id.clone(), item.quantity).await {
                warn!(error = %e, product_id = %item.product_id, "Could not restore stock");
            }
        }
    }

    async fn load(&self, id: &str) -> Result<Order, OrderError> {
        self.inner
            .get(id.to_string())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    async fn notify(&self, order: &Order, title: &str, body: String) {
        let notification = NotificationCreate::order(order.buyer.clone(), title, body);
        if let Err(e) = self.notification_client.notify(notification).await {
            warn!(error = %e, "Could not notify buyer");
        }
    }
}
