//! Checkout input types and the order draft.
//!
//! The checkout UI gathers the delivery address, payment method, and
//! delivery method; the cart turns those plus its current lines into an
//! [`OrderDraft`], the immutable snapshot the order book builds an order
//! from.

use crate::cart::{Cart, CartTotals};
use crate::error::CommerceError;
use crate::order::OrderLine;
use serde::{Deserialize, Serialize};

/// Fulfillment variant of a delivery method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryTrack {
    /// Direct courier delivery.
    Courier,
    /// Shopper-fulfilled delivery; the customer confirms receipt.
    Shopper,
}

/// A delivery method option as presented at checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryMethod {
    /// Display name (e.g., "Express delivery").
    pub name: String,
    /// Emoji shown next to the name.
    pub emoji: String,
    /// Delivery estimate string (e.g., "25-35 min").
    pub eta: String,
    /// Fulfillment variant.
    pub track: DeliveryTrack,
}

impl DeliveryMethod {
    /// Create a courier-delivered method.
    pub fn courier(name: impl Into<String>, eta: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: "\u{1f6f5}".to_string(),
            eta: eta.into(),
            track: DeliveryTrack::Courier,
        }
    }

    /// Create a shopper-fulfilled method.
    pub fn shopper(name: impl Into<String>, eta: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            emoji: "\u{1f6d2}".to_string(),
            eta: eta.into(),
            track: DeliveryTrack::Shopper,
        }
    }

    /// Set the emoji.
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }
}

/// Choices the checkout UI supplies alongside the cart.
///
/// Validating that an address and payment method were actually selected is
/// the UI's job; the core takes the strings as given.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutDetails {
    /// Store fulfilling the order.
    pub store_name: String,
    /// Delivery address string.
    pub delivery_address: String,
    /// Payment method display name (payment itself is mocked upstream).
    pub payment_method: String,
    /// Selected delivery method.
    pub delivery: DeliveryMethod,
}

/// An immutable snapshot of cart contents and pricing, ready to become an
/// order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// Frozen copies of the cart lines.
    pub items: Vec<OrderLine>,
    /// Pricing at snapshot time.
    pub totals: CartTotals,
    /// Delivery and payment choices.
    pub details: CheckoutDetails,
}

impl Cart {
    /// Snapshot the cart into an order draft.
    ///
    /// Later cart mutations never affect the draft. An empty cart cannot
    /// be drafted.
    pub fn checkout_draft(&self, details: CheckoutDetails) -> Result<OrderDraft, CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyCart);
        }
        Ok(OrderDraft {
            items: self.lines().iter().map(OrderLine::from_cart_line).collect(),
            totals: self.totals(),
            details,
        })
    }
}
