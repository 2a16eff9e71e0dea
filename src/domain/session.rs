//! Wallet availability and the account/network session.

use alloy_primitives::Address;

/// Whether a wallet provider is present in the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WalletAvailability {
    #[default]
    Missing,
    Available,
}

impl WalletAvailability {
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<bool> for WalletAvailability {
    fn from(present: bool) -> Self {
        if present {
            Self::Available
        } else {
            Self::Missing
        }
    }
}

/// The user's connection state.
///
/// The network id is only ever held alongside an account: it comes from the
/// same provider handshake that yields the account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Address>,
    network_id: Option<u64>,
}

impl Session {
    /// A session with no account and no known network.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            account: None,
            network_id: None,
        }
    }

    /// A session for a freshly connected account.
    #[must_use]
    pub const fn connected(account: Address, network_id: u64) -> Self {
        Self {
            account: Some(account),
            network_id: Some(network_id),
        }
    }

    /// Record the active network. Ignored while no account is connected.
    #[must_use]
    pub fn with_network(self, network_id: u64) -> Self {
        match self.account {
            Some(account) => Self::connected(account, network_id),
            None => self,
        }
    }

    #[must_use]
    pub const fn account(&self) -> Option<Address> {
        self.account
    }

    #[must_use]
    pub const fn network_id(&self) -> Option<u64> {
        self.network_id
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}
