//! Cart pricing calculations.
//!
//! Pure functions over a snapshot of cart lines. Nothing here is cached:
//! every query recomputes from the current lines, so there is no derived
//! state to invalidate.

use crate::cart::promotion::{Promotion, PromotionKind};
use crate::cart::CartLine;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Flat delivery fee in cents, charged on any non-empty basket.
///
/// Delivery pricing is not distance-based; the storefront charges one
/// fixed fee per order.
pub const DELIVERY_FEE_CENTS: i64 = 500;

/// Sum of `unit_price x quantity` over the given lines.
pub fn subtotal(lines: &[CartLine], currency: Currency) -> Money {
    lines.iter().fold(Money::zero(currency), |acc, line| {
        acc.saturating_add(line.line_total())
    })
}

/// Flat delivery fee: zero for an empty basket, [`DELIVERY_FEE_CENTS`]
/// otherwise.
pub fn delivery_fee(subtotal: Money) -> Money {
    if subtotal.is_positive() {
        Money::new(DELIVERY_FEE_CENTS, subtotal.currency)
    } else {
        Money::zero(subtotal.currency)
    }
}

/// Discount granted by the applied promotion, if any.
///
/// Percentage promotions take their share of the subtotal; fixed-amount
/// promotions are capped at the subtotal so a small basket never earns a
/// discount larger than itself.
pub fn discount(subtotal: Money, promotion: Option<&Promotion>) -> Money {
    match promotion.map(|p| p.kind) {
        Some(PromotionKind::PercentOff(percent)) => subtotal.percentage(percent),
        Some(PromotionKind::AmountOff(amount)) => {
            Money::new(amount.amount_cents, subtotal.currency).capped_at(subtotal)
        }
        None => Money::zero(subtotal.currency),
    }
}

/// Final total: `max(0, subtotal + delivery_fee - discount)`.
pub fn total(subtotal: Money, delivery_fee: Money, discount: Money) -> Money {
    subtotal
        .saturating_add(delivery_fee)
        .saturating_sub_floor(discount)
}

/// Complete pricing breakdown for a cart snapshot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Subtotal before fees and discounts.
    pub subtotal: Money,
    /// Flat delivery fee.
    pub delivery_fee: Money,
    /// Discount from the applied promotion.
    pub discount: Money,
    /// Final total, never negative.
    pub total: Money,
}

impl CartTotals {
    /// Compute the full breakdown for a line snapshot and optional
    /// promotion.
    pub fn compute(lines: &[CartLine], currency: Currency, promotion: Option<&Promotion>) -> Self {
        let subtotal = subtotal(lines, currency);
        let delivery_fee = delivery_fee(subtotal);
        let discount = discount(subtotal, promotion);
        let total = total(subtotal, delivery_fee, discount);
        Self {
            subtotal,
            delivery_fee,
            discount,
            total,
        }
    }

    /// Check if any discount is applied.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductRecord;
    use crate::ids::ProductId;

    fn lines() -> Vec<CartLine> {
        let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD));
        let bread = ProductRecord::new(2, "Bread", Money::new(800, Currency::USD));
        vec![
            CartLine::from_product(&apples, 2),
            CartLine::from_product(&bread, 1),
        ]
    }

    #[test]
    fn test_subtotal_sums_line_totals() {
        let s = subtotal(&lines(), Currency::USD);
        assert_eq!(s.amount_cents, 3300);
    }

    #[test]
    fn test_delivery_fee_zero_for_empty_basket() {
        assert!(delivery_fee(Money::zero(Currency::USD)).is_zero());
        assert_eq!(
            delivery_fee(Money::new(3300, Currency::USD)).amount_cents,
            DELIVERY_FEE_CENTS
        );
    }

    #[test]
    fn test_totals_without_promotion() {
        let totals = CartTotals::compute(&lines(), Currency::USD, None);
        assert_eq!(totals.subtotal.amount_cents, 3300);
        assert_eq!(totals.delivery_fee.amount_cents, 500);
        assert!(totals.discount.is_zero());
        assert_eq!(totals.total.amount_cents, 3800);
    }

    #[test]
    fn test_totals_with_save10() {
        let promo = Promotion::percent_off("SAVE10", "10% off", 10.0);
        let totals = CartTotals::compute(&lines(), Currency::USD, Some(&promo));
        assert_eq!(totals.discount.amount_cents, 330);
        assert_eq!(totals.total.amount_cents, 3470);
    }

    #[test]
    fn test_fixed_discount_capped_at_subtotal() {
        let cheap = ProductRecord::new(ProductId::new(3), "Gum", Money::new(150, Currency::USD));
        let lines = vec![CartLine::from_product(&cheap, 1)];
        let promo = Promotion::amount_off("GROCER5", "$5 off", Money::new(500, Currency::USD));

        let totals = CartTotals::compute(&lines, Currency::USD, Some(&promo));
        assert_eq!(totals.discount.amount_cents, 150);
        // Discount eats the whole subtotal; only the delivery fee remains.
        assert_eq!(totals.total.amount_cents, 500);
    }

    #[test]
    fn test_total_never_negative() {
        let t = total(
            Money::new(100, Currency::USD),
            Money::zero(Currency::USD),
            Money::new(9999, Currency::USD),
        );
        assert!(t.is_zero());
    }
}
