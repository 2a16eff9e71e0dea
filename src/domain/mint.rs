//! Mint operation state machine.
//!
//! ```text
//! Idle ──► Submitted ──► Pending ──► Confirmed
//!   │          │            │
//!   └──────────┴────────────┴──────► Failed
//! ```
//!
//! `Confirmed` and `Failed` are terminal. A new request always creates a new
//! [`MintOperation`].

use alloy_primitives::{Address, TxHash, U256};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance::BalanceSnapshot;
use super::error::DomainError;

/// Why a mint operation failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintFailure {
    /// The user declined the signature prompt.
    UserRejected,
    /// The transaction reverted on chain or was dropped.
    TransactionReverted,
    /// No confirmation arrived within the configured bound.
    TimedOut,
    /// The caller stopped waiting before the operation finished.
    Abandoned,
    /// Any other provider failure during submission.
    Provider { code: i64, message: String },
}

impl std::fmt::Display for MintFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UserRejected => write!(f, "signature rejected"),
            Self::TransactionReverted => write!(f, "transaction reverted"),
            Self::TimedOut => write!(f, "confirmation timed out"),
            Self::Abandoned => write!(f, "abandoned before completion"),
            Self::Provider { code, message } => write!(f, "provider error {code}: {message}"),
        }
    }
}

/// State of a mint operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MintState {
    Idle,
    Submitted,
    Pending,
    Confirmed,
    Failed(MintFailure),
}

impl MintState {
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed(_))
    }

    /// Button label shown by the presentation layer.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Mint some for yourself!",
            Self::Submitted | Self::Pending => "Minting in progress!",
            Self::Confirmed => "Minting completed!",
            Self::Failed(_) => "Minting failed, try again",
        }
    }

    const fn can_transition_to(&self, next: &Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Submitted)
                | (Self::Submitted, Self::Pending)
                | (Self::Pending, Self::Confirmed)
                | (Self::Idle | Self::Submitted | Self::Pending, Self::Failed(_))
        )
    }
}

impl std::fmt::Display for MintState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Submitted => write!(f, "submitted"),
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed(failure) => write!(f, "failed ({failure})"),
        }
    }
}

/// A single mint transaction, from request to terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct MintOperation {
    id: Uuid,
    target_account: Address,
    amount: Decimal,
    amount_units: U256,
    state: MintState,
    tx_hash: Option<TxHash>,
    history: Vec<MintState>,
    balance_after: Option<BalanceSnapshot>,
    created_at: DateTime<Utc>,
}

impl MintOperation {
    /// Create an operation in `Idle` for `amount` tokens (`amount_units` in
    /// base units) to `target_account`.
    #[must_use]
    pub fn new(target_account: Address, amount: Decimal, amount_units: U256) -> Self {
        Self {
            id: Uuid::new_v4(),
            target_account,
            amount,
            amount_units,
            state: MintState::Idle,
            tx_hash: None,
            history: vec![MintState::Idle],
            balance_after: None,
            created_at: Utc::now(),
        }
    }

    /// The provider accepted the submission and returned `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the operation is `Idle`.
    pub fn mark_submitted(&mut self, hash: TxHash) -> Result<(), DomainError> {
        self.transition(MintState::Submitted)?;
        self.tx_hash = Some(hash);
        Ok(())
    }

    /// The transaction is waiting for confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the operation is `Submitted`.
    pub fn mark_pending(&mut self) -> Result<(), DomainError> {
        self.transition(MintState::Pending)
    }

    /// The transaction was included; `balance_after` is the follow-up read.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] unless the operation is `Pending`.
    pub fn mark_confirmed(&mut self, balance_after: BalanceSnapshot) -> Result<(), DomainError> {
        self.transition(MintState::Confirmed)?;
        self.balance_after = Some(balance_after);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`DomainError::InvalidTransition`] if the operation is already terminal.
    pub fn mark_failed(&mut self, failure: MintFailure) -> Result<(), DomainError> {
        self.transition(MintState::Failed(failure))
    }

    fn transition(&mut self, next: MintState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(&next) {
            return Err(DomainError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.history.push(next.clone());
        self.state = next;
        Ok(())
    }

    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub const fn target_account(&self) -> Address {
        self.target_account
    }

    /// Minted amount in whole tokens.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub const fn amount_units(&self) -> U256 {
        self.amount_units
    }

    #[must_use]
    pub const fn state(&self) -> &MintState {
        &self.state
    }

    #[must_use]
    pub const fn tx_hash(&self) -> Option<TxHash> {
        self.tx_hash
    }

    /// Every state the operation has been in, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MintState] {
        &self.history
    }

    /// Balance read taken after confirmation.
    #[must_use]
    pub const fn balance_after(&self) -> Option<&BalanceSnapshot> {
        self.balance_after.as_ref()
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
