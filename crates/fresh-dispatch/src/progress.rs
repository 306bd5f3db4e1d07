//! The order progress simulator.

use fresh_commerce::order::OrderBook;
use fresh_commerce::session::SharedOrderBook;
use fresh_commerce::OrderId;
use std::collections::HashMap;
use std::sync::MutexGuard;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::debug;

/// Tuning for the progress simulator.
#[derive(Debug, Clone, Copy)]
pub struct ProgressConfig {
    /// Delay between consecutive status transitions of one order.
    pub step: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(3),
        }
    }
}

/// Advances tracked orders through their status pipeline on a timer,
/// standing in for a real dispatch backend.
///
/// Each tracked order gets its own schedule: one tokio task that sleeps a
/// step, advances the status through the order book's public mutation
/// API, and repeats until no forward transition remains. Transitions for
/// one order are strictly sequential; different orders advance
/// independently. Schedules are cancellable one at a time
/// ([`OrderProgress::release`]), in bulk ([`OrderProgress::shutdown`]),
/// and on drop, so no timer mutates state after its owner is gone.
#[derive(Debug)]
pub struct OrderProgress {
    orders: SharedOrderBook,
    config: ProgressConfig,
    schedules: HashMap<OrderId, AbortHandle>,
}

impl OrderProgress {
    /// Create a simulator over the given order book with default tuning.
    pub fn new(orders: SharedOrderBook) -> Self {
        Self::with_config(orders, ProgressConfig::default())
    }

    /// Create a simulator with explicit tuning.
    pub fn with_config(orders: SharedOrderBook, config: ProgressConfig) -> Self {
        Self {
            orders,
            config,
            schedules: HashMap::new(),
        }
    }

    /// Start advancing an order.
    ///
    /// Tracking an order that is already tracked replaces its schedule
    /// rather than doubling it. Unknown ids are harmless: the schedule
    /// ends at its first tick.
    pub fn track(&mut self, id: OrderId) {
        if let Some(previous) = self.schedules.remove(&id) {
            previous.abort();
        }
        debug!(order = %id, "tracking order");
        let orders = SharedOrderBook::clone(&self.orders);
        let step = self.config.step;
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            advance_until_settled(orders, task_id, step).await;
        });
        self.schedules.insert(id, handle.abort_handle());
    }

    /// Cancel one order's schedule.
    ///
    /// Returns `false` when the order was not tracked.
    pub fn release(&mut self, id: &OrderId) -> bool {
        match self.schedules.remove(id) {
            Some(handle) => {
                debug!(order = %id, "schedule released");
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Cancel every outstanding schedule.
    pub fn shutdown(&mut self) {
        for (_, handle) in self.schedules.drain() {
            handle.abort();
        }
    }

    /// Number of schedules still running.
    pub fn active(&self) -> usize {
        self.schedules.values().filter(|h| !h.is_finished()).count()
    }
}

impl Drop for OrderProgress {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// One order's schedule: sleep a step, advance, repeat until settled.
async fn advance_until_settled(orders: SharedOrderBook, id: OrderId, step: Duration) {
    loop {
        tokio::time::sleep(step).await;

        // The guard must not be held across the sleep.
        let advanced = {
            let mut book = lock(&orders);
            let Some(order) = book.order(&id) else {
                break;
            };
            let Some(next) = order.status().next(order.delivery().track) else {
                break;
            };
            book.set_status(&id, next);
            next
        };

        debug!(order = %id, status = advanced.as_str(), "order advanced");
        if advanced.is_terminal() {
            break;
        }
    }
}

fn lock(orders: &SharedOrderBook) -> MutexGuard<'_, OrderBook> {
    match orders.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresh_commerce::prelude::*;
    use std::time::Duration;

    const STEP: Duration = Duration::from_secs(3);
    // Nudge past the step boundary so assertions land after the tick.
    const EPSILON: Duration = Duration::from_millis(50);

    fn config() -> ProgressConfig {
        ProgressConfig { step: STEP }
    }

    fn session() -> CommerceSession {
        CommerceSession::with_order_numbers(Box::new(SequentialOrderNumbers::default()))
    }

    fn place_order(session: &mut CommerceSession, delivery: DeliveryMethod) -> OrderId {
        let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD));
        session.cart.add_item(&apples, 2);
        session
            .checkout(CheckoutDetails {
                store_name: "Green Valley Market".to_string(),
                delivery_address: "12 Elm Street".to_string(),
                payment_method: "Apple Pay".to_string(),
                delivery,
            })
            .unwrap()
    }

    fn status_of(session: &CommerceSession, id: &OrderId) -> OrderStatus {
        session.orders().order(id).unwrap().status()
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_steps_reach_preparing() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());

        tokio::time::sleep(STEP * 3 + EPSILON).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Preparing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_courier_order_settles_at_delivered() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());

        tokio::time::sleep(STEP * 10).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Delivered);
        assert_eq!(progress.active(), 0);

        // Terminal orders never mutate further.
        tokio::time::sleep(STEP * 5).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shopper_order_waits_for_customer_confirmation() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::shopper("Shopper", "45-60 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());

        tokio::time::sleep(STEP * 10).await;
        assert_eq!(status_of(&session, &id), OrderStatus::DeliveredByShopper);

        assert!(session.orders().confirm_delivery(&id));
        assert_eq!(status_of(&session, &id), OrderStatus::ConfirmedByCustomer);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_cancels_pending_transitions() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());

        tokio::time::sleep(STEP + EPSILON).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Confirmed);

        assert!(progress.release(&id));
        tokio::time::sleep(STEP * 5).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_all_schedules() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());
        drop(progress);

        tokio::time::sleep(STEP * 5).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Pending);
    }

    #[tokio::test(start_paused = true)]
    async fn test_orders_advance_independently() {
        let mut session = session();
        let first = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));
        let second = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(first.clone());
        progress.track(second.clone());

        tokio::time::sleep(STEP + EPSILON).await;
        assert_eq!(status_of(&session, &first), OrderStatus::Confirmed);
        assert_eq!(status_of(&session, &second), OrderStatus::Confirmed);

        // Releasing one schedule leaves the other running.
        progress.release(&first);
        tokio::time::sleep(STEP).await;
        assert_eq!(status_of(&session, &first), OrderStatus::Confirmed);
        assert_eq!(status_of(&session, &second), OrderStatus::Preparing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_order_stops_advancing() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());

        tokio::time::sleep(STEP + EPSILON).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Confirmed);

        assert!(session.orders().cancel(&id));
        tokio::time::sleep(STEP * 5).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retracking_replaces_the_schedule() {
        let mut session = session();
        let id = place_order(&mut session, DeliveryMethod::courier("Express", "25-35 min"));

        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(id.clone());
        progress.track(id.clone());

        // A doubled schedule would advance twice per step.
        tokio::time::sleep(STEP + EPSILON).await;
        assert_eq!(status_of(&session, &id), OrderStatus::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracking_unknown_order_is_harmless() {
        let session = session();
        let mut progress = OrderProgress::with_config(session.order_book(), config());
        progress.track(OrderId::new("FC-0"));

        tokio::time::sleep(STEP * 2).await;
        assert_eq!(progress.active(), 0);
        assert!(session.orders().is_empty());
    }
}
