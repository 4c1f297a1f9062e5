use anyhow::Context;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info, Instrument};

use luno_market::app_system::{setup_tracing, AppConfig, MarketSystem};
use luno_market::domain::{format_rupiah, Address, PaymentMethod, ProductCreate};
use luno_market::otp::OtpIssuer;
use luno_market::storage::LocalStore;
use luno_market::whatsapp;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().context("loading configuration")?;
    info!("Starting Luno storefront");

    let system = MarketSystem::new(&config);
    let mut store = LocalStore::open(&config.store_path).await?;
    let mut rng = StdRng::from_entropy();

    // Seller verifies their phone before listing products
    let seller = store.username()?.unwrap_or_else(|| "luno_seller".to_string());
    if !store.seller_verified()? {
        let issuer = OtpIssuer::new(config.otp_ttl, config.otp_max_attempts)?;
        let mut challenge = issuer.issue(config.seller_whatsapp.clone(), Utc::now(), &mut rng);
        info!(phone = %challenge.phone, code = challenge.code(), "Verification code issued");
        let code = challenge.code().to_string();
        challenge.verify(&code, Utc::now())?;
        store.set_seller_verified(true).await?;
    }

    let span = tracing::info_span!("catalog_setup", %seller);
    let (kemeja, kulot) = async {
        let kemeja = system
            .product_client
            .create_product(ProductCreate {
                name: "Kemeja Linen Oversize".to_string(),
                category: "Atasan".to_string(),
                description: "Linen adem untuk sehari-hari".to_string(),
                price: 189_000,
                stock: 12,
                images: vec!["kemeja-linen.jpg".to_string()],
                sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
                colors: vec!["Putih".to_string(), "Sage".to_string()],
            })
            .await?;
        let kulot = system
            .product_client
            .create_product(ProductCreate {
                name: "Celana Kulot".to_string(),
                category: "Bawahan".to_string(),
                price: 149_000,
                stock: 3,
                sizes: vec!["M".to_string()],
                ..ProductCreate::default()
            })
            .await?;
        anyhow::Ok((kemeja, kulot))
    }
    .instrument(span)
    .await?;
    info!(%kemeja, %kulot, "Products listed");

    // Buyer saves an address and fills the cart
    let buyer = "sari".to_string();
    system
        .account_client
        .add_address(
            buyer.clone(),
            Address {
                label: "Rumah".to_string(),
                recipient: "Sari Wulandari".to_string(),
                phone: "0812-9876-5432".to_string(),
                street: "Jl. Melati No. 7".to_string(),
                city: "Bandung".to_string(),
                province: "Jawa Barat".to_string(),
                postal_code: "40115".to_string(),
                ..Address::default()
            },
            true,
        )
        .await?;
    system
        .cart_client
        .add_item(buyer.clone(), kemeja.clone(), Some("M".into()), Some("Sage".into()), 2)
        .await?;
    let outcome = system
        .cart_client
        .add_item(buyer.clone(), kulot.clone(), Some("M".into()), None, 5)
        .await?;
    info!(quantity = outcome.quantity, capped = outcome.capped, "Cart updated");
    let likes = store.like(&kemeja).await?;
    info!(likes, "Product liked");

    let span = tracing::info_span!("order_processing", %buyer);
    let order_result = async {
        info!("Processing checkout through the market system");
        system.order_client.checkout(buyer.clone(), PaymentMethod::BankTransfer).await
    }
    .instrument(span)
    .await;

    match order_result {
        Ok(order) => {
            info!(order_id = %order.id, total = %format_rupiah(order.total_amount), "Order placed");
            let order = system.order_client.advance_order(order.id.clone()).await?;
            let link = whatsapp::chat_link(&config.seller_whatsapp, &whatsapp::order_message(&order))?;
            info!(%link, "Chat with the seller");
            let points = store.add_points(order.total_amount / 10_000).await?;
            info!(points, "Luno points earned");
        }
        Err(e) => {
            error!(error = %e, "Checkout failed")
        }
    }

    let sale = system
        .launch_flash_sale(1, Duration::hours(2), std::slice::from_ref(&buyer), &mut rng)
        .await?;
    info!(countdown = %sale.countdown(Utc::now()), "Flash sale running");
    system.end_flash_sale(&sale).await?;

    let unread = system.notification_client.unread_count(buyer.clone()).await?;
    info!(unread, "Notifications waiting");

    // Shutdown system gracefully
    system.shutdown().await.map_err(anyhow::Error::msg)?;

    info!("Application completed successfully");
    Ok(())
}
