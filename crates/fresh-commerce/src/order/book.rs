//! The order book: session-lifetime order store and lifecycle manager.

use crate::checkout::OrderDraft;
use crate::ids::OrderId;
use crate::order::{Order, OrderStatus};
use tracing::{debug, info};

/// Source of order numbers.
///
/// Injectable so tests can assert deterministic numbering while the
/// default keeps collision probability negligible within a session.
pub trait OrderNumbers: Send {
    /// Produce the next order number.
    fn next(&mut self) -> u64;
}

/// Monotonic order numbers from a fixed start. Deterministic; the test
/// default.
#[derive(Debug, Clone)]
pub struct SequentialOrderNumbers {
    next: u64,
}

impl SequentialOrderNumbers {
    pub fn new(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialOrderNumbers {
    fn default() -> Self {
        Self::new(100_001)
    }
}

impl OrderNumbers for SequentialOrderNumbers {
    fn next(&mut self) -> u64 {
        let n = self.next;
        self.next += 1;
        n
    }
}

/// Order numbers mixed from the clock and a per-process counter.
///
/// Not cryptographically random; unique enough for a session-lifetime
/// store with a human-facing reference.
#[derive(Debug, Clone, Default)]
pub struct EntropyOrderNumbers;

impl OrderNumbers for EntropyOrderNumbers {
    fn next(&mut self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::time::{SystemTime, UNIX_EPOCH};

        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst);

        // Six digits keeps the reference readable on a receipt.
        100_000 + (timestamp.wrapping_add(counter.wrapping_mul(7919))) % 900_000
    }
}

/// Owns every order placed during the session, most recent first.
///
/// The order book trusts its callers (the progress simulator, or an
/// explicit customer action) to respect the status machine;
/// [`OrderBook::set_status`] overwrites without validating the
/// transition. Lookups and mutations on unknown ids are no-ops.
pub struct OrderBook {
    orders: Vec<Order>,
    numbers: Box<dyn OrderNumbers>,
}

impl OrderBook {
    /// Create an order book with the given number source.
    pub fn new(numbers: Box<dyn OrderNumbers>) -> Self {
        Self {
            orders: Vec::new(),
            numbers,
        }
    }

    /// Build an order from a draft and prepend it.
    ///
    /// Most-recent-first ordering is an observable contract: consumers
    /// render [`OrderBook::orders`] without re-sorting.
    pub fn place(&mut self, draft: OrderDraft) -> OrderId {
        let order = Order::from_draft(draft, self.numbers.next());
        let id = order.id().clone();
        info!(order = %id, total = %order.total(), "order placed");
        self.orders.insert(0, order);
        id
    }

    /// Overwrite an order's status.
    ///
    /// No transition validation; unknown ids are a no-op returning
    /// `false`.
    pub fn set_status(&mut self, id: &OrderId, status: OrderStatus) -> bool {
        match self.order_mut(id) {
            Some(order) => {
                debug!(order = %id, status = status.as_str(), "order status updated");
                order.set_status(status);
                true
            }
            None => false,
        }
    }

    /// Customer confirms receipt of a shopper-fulfilled order.
    ///
    /// Only valid from `DeliveredByShopper`; from any other status this
    /// is a no-op returning `false`.
    pub fn confirm_delivery(&mut self, id: &OrderId) -> bool {
        match self.order_mut(id) {
            Some(order) if order.status() == OrderStatus::DeliveredByShopper => {
                order.set_status(OrderStatus::ConfirmedByCustomer);
                order.stamp_customer_confirmation();
                info!(order = %id, "delivery confirmed by customer");
                true
            }
            _ => false,
        }
    }

    /// Cancel an order still in a non-terminal state.
    pub fn cancel(&mut self, id: &OrderId) -> bool {
        match self.order_mut(id) {
            Some(order) if order.status().can_cancel() => {
                order.set_status(OrderStatus::Cancelled);
                info!(order = %id, "order cancelled");
                true
            }
            _ => false,
        }
    }

    /// Look up an order by id.
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    /// All orders, most recent first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    fn order_mut(&mut self, id: &OrderId) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id() == id)
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new(Box::new(EntropyOrderNumbers))
    }
}

impl std::fmt::Debug for OrderBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderBook")
            .field("orders", &self.orders)
            .finish_non_exhaustive()
    }
}
