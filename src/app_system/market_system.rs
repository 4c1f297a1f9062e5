use chrono::{Duration, Utc};
use rand::Rng;
use tracing::{error, info, instrument, warn};

use crate::actor_framework::{sequential_ids, ResourceActor};
use crate::app_system::AppConfig;
use crate::clients::{AccountClient, CartClient, NotificationClient, OrderClient, ProductClient};
use crate::domain::{
    Address, BankAccount, Cart, MainBook, Notification, NotificationCreate, Order, Product, ProductQuery,
};
use crate::product_actor::ProductError;
use crate::promo::FlashSale;

/// The storefront: every repository actor, wired together.
///
/// Responsible for starting up actors, handing out clients, and shutdown.
pub struct MarketSystem {
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    pub account_client: AccountClient,
    pub notification_client: NotificationClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl MarketSystem {
    pub fn new(config: &AppConfig) -> Self {
        let buffer = config.channel_buffer;

        // 1. Catalog
        let (product_actor, product_resource) = ResourceActor::<Product>::new(buffer, sequential_ids("product"));
        let product_client = ProductClient::new(product_resource);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Carts, keyed by owner
        let (cart_actor, cart_resource) = ResourceActor::<Cart>::keyed(buffer);
        let cart_client = CartClient::new(cart_resource, product_client.clone());
        let cart_handle = tokio::spawn(cart_actor.run());

        // 3. Address and bank account books, keyed by owner
        let (address_actor, address_resource) = ResourceActor::<MainBook<Address>>::keyed(buffer);
        let (bank_actor, bank_resource) = ResourceActor::<MainBook<BankAccount>>::keyed(buffer);
        let account_client = AccountClient::new(address_resource, bank_resource);
        let address_handle = tokio::spawn(address_actor.run());
        let bank_handle = tokio::spawn(bank_actor.run());

        // 4. Notifications
        let (notification_actor, notification_resource) =
            ResourceActor::<Notification>::new(buffer, sequential_ids("notif"));
        let notification_client = NotificationClient::new(notification_resource);
        let notification_handle = tokio::spawn(notification_actor.run());

        // 5. Orders, which talk to everything above
        let (order_actor, order_resource) = ResourceActor::<Order>::new(buffer, sequential_ids("order"));
        let order_client = OrderClient::new(
            order_resource,
            product_client.clone(),
            cart_client.clone(),
            account_client.clone(),
            notification_client.clone(),
            config.shipping_fee,
        );
        let order_handle = tokio::spawn(order_actor.run());

        info!(buffer, shipping_fee = config.shipping_fee, "Market system started");

        Self {
            product_client,
            cart_client,
            order_client,
            account_client,
            notification_client,
            handles: vec![
                product_handle,
                cart_handle,
                address_handle,
                bank_handle,
                notification_handle,
                order_handle,
            ],
        }
    }

    /// Discounts up to `count` random in-stock products for `duration` and
    /// sends a promo notification to each member of `audience`.
    #[instrument(skip(self, audience, rng))]
    pub async fn launch_flash_sale<R: Rng + ?Sized>(
        &self,
        count: usize,
        duration: Duration,
        audience: &[String],
        rng: &mut R,
    ) -> Result<FlashSale, ProductError> {
        let query = ProductQuery { in_stock_only: true, ..ProductQuery::default() };
        let ids: Vec<String> = self
            .product_client
            .list_products(query)
            .await?
            .into_iter()
            .map(|product| product.id)
            .collect();
        let sale = FlashSale::launch(&ids, count, Utc::now(), duration, rng);

        self.product_client.apply_discounts(&sale.discounts).await?;
        info!(products = sale.discounts.len(), ends_at = %sale.ends_at, "Flash sale launched");

        let top = sale.discounts.values().max().copied().unwrap_or(0);
        let body = format!("Diskon hingga {}% untuk {} produk pilihan!", top, sale.discounts.len());
        for recipient in audience {
            let notification = NotificationCreate::promo(recipient.clone(), "Flash Sale dimulai", body.clone());
            if let Err(e) = self.notification_client.notify(notification).await {
                warn!(error = %e, %recipient, "Could not send promo notification");
            }
        }
        Ok(sale)
    }

    /// Removes the sale's discounts. Products deleted in the meantime are skipped.
    #[instrument(skip(self, sale))]
    pub async fn end_flash_sale(&self, sale: &FlashSale) -> Result<(), ProductError> {
        self.product_client.clear_discounts(sale.discounts.keys().cloned()).await?;
        info!(products = sale.discounts.len(), "Flash sale ended");
        Ok(())
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Dropping every client closes the channels; each actor then exits its loop.
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.account_client);
        drop(self.notification_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
