//! Domain validation errors for core domain types.
//!
//! These errors are returned when an amount cannot be represented on one
//! side of the base-unit / whole-unit boundary, or when a mint operation is
//! asked to move backwards through its state machine.
//!
//! # Examples
//!
//! ```
//! use coinclaim::domain::amount::to_base_units;
//! use coinclaim::domain::error::DomainError;
//! use rust_decimal_macros::dec;
//!
//! let result = to_base_units(dec!(-1), 18);
//! assert!(matches!(result, Err(DomainError::NegativeAmount { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// On-chain amounts are unsigned.
    #[error("amount must not be negative, got {amount}")]
    NegativeAmount {
        /// The invalid amount that was provided.
        amount: rust_decimal::Decimal,
    },

    /// The amount does not fit the target representation.
    #[error("amount {amount} with {decimals} decimals is out of range")]
    AmountOverflow {
        /// Textual form of the amount that overflowed.
        amount: String,
        /// Decimals used for the conversion.
        decimals: u32,
    },

    /// Mint operations only move forward through their state machine.
    #[error("invalid mint transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}
