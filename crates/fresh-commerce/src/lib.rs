//! Grocery storefront domain types and stores for FreshCart.
//!
//! This crate is the in-process commerce core behind the storefront UI:
//!
//! - **Catalog**: opaque product records supplied by the external catalog
//! - **Cart**: lines, promotion codes, and derived pricing
//! - **Checkout**: delivery/payment choices and the order draft snapshot
//! - **Order**: the immutable order, its status machine, and the order
//!   book that manages the lifecycle
//! - **Session**: the per-session store composing cart and order book
//!
//! Screens, navigation, payment gateways, and persistence live elsewhere;
//! everything here is session-lifetime, in-memory state.
//!
//! # Example
//!
//! ```
//! use fresh_commerce::prelude::*;
//!
//! let mut session = CommerceSession::new();
//!
//! let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD))
//!     .with_category("Fruits")
//!     .with_unit_label("1 kg");
//! session.cart.add_item(&apples, 2);
//! session.cart.apply_promo_code("SAVE10");
//!
//! let order_id = session
//!     .checkout(CheckoutDetails {
//!         store_name: "Green Valley Market".into(),
//!         delivery_address: "12 Elm Street".into(),
//!         payment_method: "Apple Pay".into(),
//!         delivery: DeliveryMethod::courier("Express delivery", "25-35 min"),
//!     })
//!     .unwrap();
//!
//! assert!(session.cart.is_empty());
//! assert_eq!(session.orders().order(&order_id).unwrap().status(), OrderStatus::Pending);
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod session;

pub use error::CommerceError;
pub use ids::{OrderId, ProductId};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::{OrderId, ProductId};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::ProductRecord;

    // Cart
    pub use crate::cart::{Cart, CartLine, CartTotals, Promotion, PromotionKind};

    // Checkout
    pub use crate::checkout::{CheckoutDetails, DeliveryMethod, DeliveryTrack, OrderDraft};

    // Order
    pub use crate::order::{
        EntropyOrderNumbers, Order, OrderBook, OrderLine, OrderNumbers, OrderStatus,
        SequentialOrderNumbers,
    };

    // Session
    pub use crate::session::{CommerceSession, SharedOrderBook};
}
