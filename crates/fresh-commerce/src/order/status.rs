//! Order status state machine.

use crate::checkout::DeliveryTrack;
use serde::{Deserialize, Serialize};

/// Fulfillment states an order passes through.
///
/// The forward pipeline is
/// `Pending -> Confirmed -> Preparing -> OnTheWay`, ending in `Delivered`
/// for courier orders or `DeliveredByShopper -> ConfirmedByCustomer` for
/// shopper-fulfilled ones. Any non-terminal order can be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Order confirmed by the store.
    Confirmed,
    /// Order being picked and packed.
    Preparing,
    /// Order out for delivery.
    OnTheWay,
    /// Courier order delivered. Terminal.
    Delivered,
    /// Shopper dropped the order off; awaiting customer confirmation.
    DeliveredByShopper,
    /// Customer confirmed receipt. Terminal.
    ConfirmedByCustomer,
    /// Order cancelled. Terminal.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OnTheWay => "on_the_way",
            OrderStatus::Delivered => "delivered",
            OrderStatus::DeliveredByShopper => "delivered_by_shopper",
            OrderStatus::ConfirmedByCustomer => "confirmed_by_customer",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::OnTheWay => "On the way",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::DeliveredByShopper => "Dropped off",
            OrderStatus::ConfirmedByCustomer => "Received",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if the order has reached a terminal state.
    ///
    /// `DeliveredByShopper` is not terminal: the order still awaits the
    /// customer's confirmation.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::ConfirmedByCustomer | OrderStatus::Cancelled
        )
    }

    /// Check if the order can still be cancelled.
    pub fn can_cancel(&self) -> bool {
        !self.is_terminal()
    }

    /// Next forward state in the pipeline for the given delivery track.
    ///
    /// Returns `None` once there is no transition left to dispatch:
    /// terminal states, and `DeliveredByShopper`, whose only exit is the
    /// customer's explicit confirmation.
    pub fn next(&self, track: DeliveryTrack) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::OnTheWay),
            OrderStatus::OnTheWay => Some(match track {
                DeliveryTrack::Courier => OrderStatus::Delivered,
                DeliveryTrack::Shopper => OrderStatus::DeliveredByShopper,
            }),
            OrderStatus::Delivered
            | OrderStatus::DeliveredByShopper
            | OrderStatus::ConfirmedByCustomer
            | OrderStatus::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_pipeline_runs_to_delivered() {
        let mut status = OrderStatus::Pending;
        let mut seen = vec![status];
        while let Some(next) = status.next(DeliveryTrack::Courier) {
            status = next;
            seen.push(status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Pending,
                OrderStatus::Confirmed,
                OrderStatus::Preparing,
                OrderStatus::OnTheWay,
                OrderStatus::Delivered,
            ]
        );
        assert!(status.is_terminal());
    }

    #[test]
    fn test_shopper_pipeline_stops_at_drop_off() {
        let mut status = OrderStatus::Pending;
        while let Some(next) = status.next(DeliveryTrack::Shopper) {
            status = next;
        }
        assert_eq!(status, OrderStatus::DeliveredByShopper);
        // Not terminal: the customer still has to confirm receipt.
        assert!(!status.is_terminal());
        assert!(status.next(DeliveryTrack::Shopper).is_none());
    }

    #[test]
    fn test_terminal_states_have_no_next() {
        for status in [
            OrderStatus::Delivered,
            OrderStatus::ConfirmedByCustomer,
            OrderStatus::Cancelled,
        ] {
            assert!(status.is_terminal());
            assert!(status.next(DeliveryTrack::Courier).is_none());
            assert!(!status.can_cancel());
        }
    }

    #[test]
    fn test_non_terminal_states_can_cancel() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::OnTheWay,
            OrderStatus::DeliveredByShopper,
        ] {
            assert!(status.can_cancel());
        }
    }
}
