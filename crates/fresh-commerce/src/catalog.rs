//! Catalog product records.
//!
//! The product catalog lives outside this core; it hands the cart opaque
//! value objects and nothing more. There is no lookup, search, or
//! inventory here.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product record as supplied by the external catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRecord {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Price per unit.
    pub unit_price: Money,
    /// Category name (e.g., "Fruits").
    pub category: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit label shown next to the price (e.g., "1 kg", "500 g").
    pub unit_label: String,
}

impl ProductRecord {
    /// Create a product record.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, unit_price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            category: String::new(),
            image_url: String::new(),
            unit_label: String::new(),
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    /// Set the unit label.
    pub fn with_unit_label(mut self, label: impl Into<String>) -> Self {
        self.unit_label = label.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_record_builder() {
        let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD))
            .with_category("Fruits")
            .with_unit_label("1 kg");

        assert_eq!(apples.id.value(), 1);
        assert_eq!(apples.category, "Fruits");
        assert_eq!(apples.unit_label, "1 kg");
        assert!(apples.image_url.is_empty());
    }
}
