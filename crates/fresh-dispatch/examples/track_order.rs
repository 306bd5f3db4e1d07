//! End-to-end walkthrough: fill a cart, check out, and watch the order
//! advance to delivery.
//!
//! Run with `cargo run --example track_order`.

use fresh_commerce::prelude::*;
use fresh_dispatch::{OrderProgress, ProgressConfig};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut session = CommerceSession::new();

    let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD))
        .with_category("Fruits")
        .with_unit_label("1 kg");
    let bread = ProductRecord::new(2, "Sourdough bread", Money::new(800, Currency::USD))
        .with_category("Bakery")
        .with_unit_label("1 loaf");

    session.cart.add_item(&apples, 2);
    session.cart.add_item(&bread, 1);
    session.cart.apply_promo_code("SAVE10");

    let totals = session.cart.totals();
    info!(
        subtotal = %totals.subtotal,
        delivery = %totals.delivery_fee,
        discount = %totals.discount,
        total = %totals.total,
        "cart ready"
    );

    let order_id = session
        .checkout(CheckoutDetails {
            store_name: "Green Valley Market".into(),
            delivery_address: "12 Elm Street".into(),
            payment_method: "Apple Pay".into(),
            delivery: DeliveryMethod::courier("Express delivery", "25-35 min"),
        })
        .expect("cart is not empty");

    let mut progress = OrderProgress::with_config(
        session.order_book(),
        ProgressConfig {
            step: Duration::from_secs(2),
        },
    );
    progress.track(order_id.clone());

    // Poll the order book the way a tracking screen would.
    let mut last = None;
    loop {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let status = match session.orders().order(&order_id) {
            Some(order) => order.status(),
            None => break,
        };
        if last != Some(status) {
            info!(order = %order_id, status = status.display_name(), "progress");
            last = Some(status);
        }
        if status.is_terminal() {
            break;
        }
    }

    let orders = session.orders();
    let order = orders.order(&order_id).expect("order was placed");
    info!(
        order = %order.reference(),
        items = order.item_count(),
        total = %order.total(),
        "order delivered"
    );
}
