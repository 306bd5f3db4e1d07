//! Order progress simulation for FreshCart.
//!
//! A real storefront would hear about an order's progress from a dispatch
//! backend. This crate stands in for one: it advances each tracked order
//! through its status pipeline on a timer, one independent, cancellable
//! schedule per order, mutating state only through the order book's
//! public API.
//!
//! # Example
//!
//! ```no_run
//! use fresh_commerce::prelude::*;
//! use fresh_dispatch::OrderProgress;
//!
//! # async fn run() {
//! let mut session = CommerceSession::new();
//! let apples = ProductRecord::new(1, "Apples", Money::new(1250, Currency::USD));
//! session.cart.add_item(&apples, 2);
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
//! let mut progress = OrderProgress::new(session.order_book());
//! progress.track(order_id);
//! // ...the tracking screen now polls the order book for display.
//! # }
//! ```

mod progress;

pub use progress::{OrderProgress, ProgressConfig};
