//! Promotion code definitions.

use crate::money::Money;
use serde::{Deserialize, Serialize};

/// The effect of a recognized promotion code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum PromotionKind {
    /// Percentage off the cart subtotal (0.0 - 100.0).
    PercentOff(f64),
    /// Fixed amount off the cart subtotal.
    AmountOff(Money),
}

/// A known promotion code and its discount rule.
///
/// Codes match case-insensitively. At most one promotion is applied to a
/// cart at a time; only its effect on the totals is retained.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// The code customers enter (stored uppercase, e.g. "SAVE10").
    pub code: String,
    /// Short description for display.
    pub description: String,
    /// Discount rule.
    pub kind: PromotionKind,
}

impl Promotion {
    /// Create a percentage-off promotion.
    pub fn percent_off(code: impl Into<String>, description: impl Into<String>, percent: f64) -> Self {
        Self {
            code: code.into().to_uppercase(),
            description: description.into(),
            kind: PromotionKind::PercentOff(percent),
        }
    }

    /// Create a fixed-amount-off promotion.
    pub fn amount_off(
        code: impl Into<String>,
        description: impl Into<String>,
        amount: Money,
    ) -> Self {
        Self {
            code: code.into().to_uppercase(),
            description: description.into(),
            kind: PromotionKind::AmountOff(amount),
        }
    }

    /// Check whether a user-entered code matches this promotion.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    /// The promotions the storefront currently honors.
    pub fn standard_set() -> Vec<Promotion> {
        use crate::money::Currency;
        vec![
            Promotion::percent_off("SAVE10", "10% off your basket", 10.0),
            Promotion::percent_off("FRESH15", "15% off your basket", 15.0),
            Promotion::amount_off(
                "GROCER5",
                "$5 off your basket",
                Money::new(500, Currency::USD),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_matching_is_case_insensitive() {
        let promo = Promotion::percent_off("SAVE10", "10% off", 10.0);
        assert!(promo.matches("save10"));
        assert!(promo.matches("Save10"));
        assert!(promo.matches(" SAVE10 "));
        assert!(!promo.matches("SAVE20"));
    }

    #[test]
    fn test_codes_stored_uppercase() {
        let promo = Promotion::percent_off("fresh15", "15% off", 15.0);
        assert_eq!(promo.code, "FRESH15");
    }

    #[test]
    fn test_standard_set_contains_save10() {
        let set = Promotion::standard_set();
        assert!(set.iter().any(|p| p.matches("SAVE10")));
    }
}
