//! Cart and cart line types.

use crate::cart::pricing::CartTotals;
use crate::cart::promotion::Promotion;
use crate::catalog::ProductRecord;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One product entry in the cart, uniquely keyed by product id.
///
/// Lines are created on first add, mutated by quantity updates, and leave
/// the cart only through [`Cart::remove_item`] or [`Cart::clear`]. The
/// quantity floor is 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product this line refers to.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Price per unit at the time the line was created.
    pub unit_price: Money,
    /// Product image URL.
    pub image_url: String,
    /// Category name.
    pub category: String,
    /// Unit label (e.g., "1 kg").
    pub unit_label: String,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Create a line from a catalog record.
    pub fn from_product(product: &ProductRecord, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.unit_price,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            unit_label: product.unit_label.clone(),
            quantity: quantity.max(1),
        }
    }

    /// Line total: `unit_price x quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// The shopping cart: owns the mutable line list and the applied
/// promotion.
///
/// Totals are derived values, recomputed from the lines on every query.
/// Mutations on a product id with no line are idempotent no-ops so UI
/// retries stay harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    currency: Currency,
    lines: Vec<CartLine>,
    known_promotions: Vec<Promotion>,
    applied_promotion: Option<Promotion>,
}

impl Cart {
    /// Create an empty cart honoring the standard promotion set.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            lines: Vec::new(),
            known_promotions: Promotion::standard_set(),
            applied_promotion: None,
        }
    }

    /// Replace the set of promotions this cart recognizes.
    pub fn with_promotions(mut self, promotions: Vec<Promotion>) -> Self {
        self.known_promotions = promotions;
        self
    }

    /// Add a product to the cart.
    ///
    /// Merges into the existing line for that product id (quantities
    /// accumulate without an upper bound) or inserts a new line. A
    /// requested quantity of zero is treated as one.
    pub fn add_item(&mut self, product: &ProductRecord, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!(product = %product.id, quantity = line.quantity, "cart line incremented");
            return;
        }
        self.lines.push(CartLine::from_product(product, quantity));
        debug!(product = %product.id, quantity, "cart line added");
    }

    /// Remove a line unconditionally.
    ///
    /// Returns `false` (no-op) when no line exists for the product.
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        let removed = self.lines.len() < len_before;
        if removed {
            debug!(product = %product_id, "cart line removed");
        }
        removed
    }

    /// Set a line's quantity, clamped to a floor of 1.
    ///
    /// Never removes the line: deletion is always the explicit
    /// [`Cart::remove_item`]. Returns `false` when no line exists.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity.max(1);
                debug!(product = %product_id, quantity = line.quantity, "cart quantity set");
                true
            }
            None => false,
        }
    }

    /// Empty the cart and drop the applied promotion. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.applied_promotion = None;
        debug!("cart cleared");
    }

    /// Apply a promotion code.
    ///
    /// On a recognized code the promotion replaces any previously applied
    /// one (promotions do not stack) and the call returns `true`. An
    /// unknown code returns `false` and leaves the previous promotion in
    /// effect.
    pub fn apply_promo_code(&mut self, code: &str) -> bool {
        match self.known_promotions.iter().find(|p| p.matches(code)) {
            Some(promotion) => {
                debug!(code = %promotion.code, "promotion applied");
                self.applied_promotion = Some(promotion.clone());
                true
            }
            None => {
                debug!(code, "unrecognized promotion code ignored");
                false
            }
        }
    }

    /// The currently applied promotion, if any.
    pub fn applied_promotion(&self) -> Option<&Promotion> {
        self.applied_promotion.as_ref()
    }

    /// Current lines, in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Pricing breakdown for the current lines, recomputed from scratch.
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.lines, self.currency, self.applied_promotion.as_ref())
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}
