//! Point-in-time balance reads.

use alloy_primitives::Address;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::session::Session;

/// Which balance a read refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceKind {
    /// Native currency of the chain (gas).
    Native,
    /// The reward token.
    Token,
}

impl std::fmt::Display for BalanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Token => write!(f, "token"),
        }
    }
}

/// A sub-read that failed and fell back to zero.
///
/// Recorded on the snapshot and logged; never raised to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceReadDegraded {
    pub kind: BalanceKind,
    pub reason: String,
}

/// Native and token balances for one (account, network) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSnapshot {
    pub account: Address,
    pub network_id: u64,
    /// Native currency in whole units.
    pub native_balance: Decimal,
    /// Reward token in whole units.
    pub token_balance: Decimal,
    pub degraded: Vec<BalanceReadDegraded>,
    pub taken_at: DateTime<Utc>,
}

impl BalanceSnapshot {
    /// A zero snapshot, used when nothing on this network can be priced.
    #[must_use]
    pub fn zero(account: Address, network_id: u64) -> Self {
        Self {
            account,
            network_id,
            native_balance: Decimal::ZERO,
            token_balance: Decimal::ZERO,
            degraded: Vec::new(),
            taken_at: Utc::now(),
        }
    }

    /// Whether this snapshot was taken against the session's current
    /// account and network.
    #[must_use]
    pub fn is_valid_for(&self, session: &Session) -> bool {
        session.account() == Some(self.account) && session.network_id() == Some(self.network_id)
    }

    /// Whether any sub-read fell back to zero.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}
