//! Order types.

use crate::cart::CartLine;
use crate::checkout::{DeliveryMethod, OrderDraft};
use crate::ids::{OrderId, ProductId};
use crate::money::Money;
use crate::order::OrderStatus;
use serde::{Deserialize, Serialize};

/// A line item frozen into an order at checkout.
///
/// Copied from the cart line at order-creation time and never re-derived
/// from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    /// Product ID at time of order.
    pub product_id: ProductId,
    /// Product name at time of order.
    pub name: String,
    /// Unit price at time of order.
    pub unit_price: Money,
    /// Quantity ordered.
    pub quantity: u32,
    /// Unit label (e.g., "1 kg").
    pub unit_label: String,
    /// Product image URL.
    pub image_url: String,
}

impl OrderLine {
    /// Freeze a cart line into an order line.
    pub fn from_cart_line(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id,
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            unit_label: line.unit_label.clone(),
            image_url: line.image_url.clone(),
        }
    }

    /// Line total: `unit_price x quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// A placed order: an immutable snapshot of cart contents and pricing.
///
/// After creation only the status (and the customer-confirmation stamp)
/// ever changes, and only through the
/// [`OrderBook`](crate::order::OrderBook). Fields are private so the
/// snapshot stays a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    id: OrderId,
    order_number: u64,
    items: Vec<OrderLine>,
    subtotal: Money,
    delivery_fee: Money,
    discount: Money,
    total: Money,
    store_name: String,
    delivery_address: String,
    payment_method: String,
    delivery: DeliveryMethod,
    status: OrderStatus,
    created_at: i64,
    customer_confirmed_at: Option<i64>,
}

impl Order {
    /// Prefix for derived order ids (e.g., `FC-100042`).
    pub const ID_PREFIX: &'static str = "FC";

    /// Build an order from a draft, with a fresh order number.
    pub(crate) fn from_draft(draft: OrderDraft, order_number: u64) -> Self {
        Self {
            id: OrderId::new(format!("{}-{}", Self::ID_PREFIX, order_number)),
            order_number,
            items: draft.items,
            subtotal: draft.totals.subtotal,
            delivery_fee: draft.totals.delivery_fee,
            discount: draft.totals.discount,
            total: draft.totals.total,
            store_name: draft.details.store_name,
            delivery_address: draft.details.delivery_address,
            payment_method: draft.details.payment_method,
            delivery: draft.details.delivery,
            status: OrderStatus::Pending,
            created_at: current_timestamp(),
            customer_confirmed_at: None,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Order number; doubles as the human-facing reference suffix.
    pub fn order_number(&self) -> u64 {
        self.order_number
    }

    /// Human-facing reference (e.g., "#100042").
    pub fn reference(&self) -> String {
        format!("#{}", self.order_number)
    }

    pub fn items(&self) -> &[OrderLine] {
        &self.items
    }

    /// Total item count across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn store_name(&self) -> &str {
        &self.store_name
    }

    pub fn delivery_address(&self) -> &str {
        &self.delivery_address
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn delivery(&self) -> &DeliveryMethod {
        &self.delivery
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Unix timestamp of creation.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    /// Unix timestamp of the customer's delivery confirmation, if given.
    pub fn customer_confirmed_at(&self) -> Option<i64> {
        self.customer_confirmed_at
    }

    pub(crate) fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub(crate) fn stamp_customer_confirmation(&mut self) {
        self.customer_confirmed_at = Some(current_timestamp());
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
