//! The per-session storefront store.
//!
//! One [`CommerceSession`] is constructed per app session and passed to
//! the screens that need it; there is no ambient global. The cart is
//! plain owned state, while the order book sits behind a shared handle so
//! the progress simulator can advance orders while the session lives.

use crate::cart::Cart;
use crate::checkout::CheckoutDetails;
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::order::{OrderBook, OrderNumbers};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

/// Shared handle to an [`OrderBook`].
pub type SharedOrderBook = Arc<Mutex<OrderBook>>;

/// Session-lifetime storefront state: the cart plus the order book.
#[derive(Debug)]
pub struct CommerceSession {
    /// The shopping cart.
    pub cart: Cart,
    orders: SharedOrderBook,
}

impl CommerceSession {
    /// Create a session with the default cart and order numbering.
    pub fn new() -> Self {
        Self {
            cart: Cart::default(),
            orders: Arc::new(Mutex::new(OrderBook::default())),
        }
    }

    /// Create a session with an injected order number source.
    pub fn with_order_numbers(numbers: Box<dyn OrderNumbers>) -> Self {
        Self {
            cart: Cart::default(),
            orders: Arc::new(Mutex::new(OrderBook::new(numbers))),
        }
    }

    /// Clone the shared order book handle (e.g., for the progress
    /// simulator).
    pub fn order_book(&self) -> SharedOrderBook {
        Arc::clone(&self.orders)
    }

    /// Lock the order book for reading or mutation.
    pub fn orders(&self) -> MutexGuard<'_, OrderBook> {
        match self.orders.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Check out the current cart.
    ///
    /// Snapshots the cart into an order, places it in the order book, and
    /// clears the cart. Subsequent cart changes never affect the placed
    /// order.
    pub fn checkout(&mut self, details: CheckoutDetails) -> Result<OrderId, CommerceError> {
        let draft = self.cart.checkout_draft(details)?;
        let id = self.orders().place(draft);
        self.cart.clear();
        info!(order = %id, "checkout complete, cart cleared");
        Ok(id)
    }
}

impl Default for CommerceSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;
    use crate::checkout::DeliveryMethod;
    use crate::money::{Currency, Money};
    use crate::order::{OrderStatus, SequentialOrderNumbers};

    fn details() -> CheckoutDetails {
        CheckoutDetails {
            store_name: "Green Valley Market".to_string(),
            delivery_address: "12 Elm Street".to_string(),
            payment_method: "Apple Pay".to_string(),
            delivery: DeliveryMethod::courier("Express delivery", "25-35 min"),
        }
    }

    #[test]
    fn test_checkout_places_order_and_clears_cart() {
        let mut session =
            CommerceSession::with_order_numbers(Box::new(SequentialOrderNumbers::default()));
        let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD));
        session.cart.add_item(&apples, 2);
        session.cart.apply_promo_code("SAVE10");

        let id = session.checkout(details()).unwrap();

        assert!(session.cart.is_empty());
        assert!(session.cart.applied_promotion().is_none());

        let orders = session.orders();
        let order = orders.order(&id).unwrap();
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.subtotal().amount_cents, 2500);
        assert_eq!(order.discount().amount_cents, 250);
        assert_eq!(order.total().amount_cents, 2750);
    }

    #[test]
    fn test_checkout_empty_cart_is_rejected() {
        let mut session = CommerceSession::new();
        assert!(matches!(
            session.checkout(details()),
            Err(CommerceError::EmptyCart)
        ));
        assert!(session.orders().is_empty());
    }

    #[test]
    fn test_cart_mutations_never_touch_placed_orders() {
        let mut session =
            CommerceSession::with_order_numbers(Box::new(SequentialOrderNumbers::default()));
        let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD));
        session.cart.add_item(&apples, 2);
        let id = session.checkout(details()).unwrap();

        session.cart.add_item(&apples, 9);
        session.cart.clear();

        let orders = session.orders();
        let order = orders.order(&id).unwrap();
        assert_eq!(order.items().len(), 1);
        assert_eq!(order.items()[0].quantity, 2);
        assert_eq!(order.total().amount_cents, 3000);
    }
}
