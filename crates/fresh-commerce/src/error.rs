//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in storefront operations.
///
/// The taxonomy is deliberately narrow: cart and order mutations on
/// missing ids are idempotent no-ops rather than errors, so UI retries
/// stay harmless.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Checkout attempted on an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },
}
