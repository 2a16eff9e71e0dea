//! Wallet provider port.
//!
//! Models an EIP-1193 style wallet: a permissioned account request, network
//! reads and switches, chain registration, asset registration and
//! transaction submission. Signing happens inside the provider.

use std::sync::Arc;

use alloy_primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{AssetParams, ChainParams};

/// Error reported by a wallet provider, carrying its numeric code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("provider error {code}: {message}")]
pub struct ProviderError {
    pub code: i64,
    pub message: String,
}

impl ProviderError {
    /// The user rejected the request (EIP-1193).
    pub const USER_REJECTED: i64 = 4001;

    /// The requested chain has not been added to the wallet (EIP-3326).
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;

    /// Internal JSON-RPC error.
    pub const INTERNAL: i64 = -32603;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn user_rejected() -> Self {
        Self::new(Self::USER_REJECTED, "user rejected the request")
    }

    #[must_use]
    pub fn unrecognized_chain(chain_id: u64) -> Self {
        Self::new(
            Self::UNRECOGNIZED_CHAIN,
            format!("unrecognized chain id {chain_id:#x}"),
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL, message)
    }

    #[must_use]
    pub const fn is_user_rejection(&self) -> bool {
        self.code == Self::USER_REJECTED
    }

    #[must_use]
    pub const fn is_unrecognized_chain(&self) -> bool {
        self.code == Self::UNRECOGNIZED_CHAIN
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// A transaction for the provider to sign and submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

/// Final on-chain status of a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// Included successfully.
    Included {
        /// Block the transaction landed in, when the provider reports it.
        block_number: Option<u64>,
    },
    /// Included but reverted, or dropped from the mempool.
    Reverted,
}

/// Port for the user's wallet.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user for account access. May prompt.
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>>;

    /// Chain id of the wallet's active network.
    async fn chain_id(&self) -> ProviderResult<u64>;

    /// Ask the wallet to change its active network.
    ///
    /// Fails with [`ProviderError::UNRECOGNIZED_CHAIN`] if the wallet does
    /// not know `chain_id`.
    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()>;

    /// Ask the wallet to register a new network.
    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()>;

    /// Ask the wallet to track a token. Returns whether it was added.
    async fn watch_asset(&self, params: &AssetParams) -> ProviderResult<bool>;

    /// Sign and submit a transaction. May prompt. Returns the hash once the
    /// provider has accepted it.
    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash>;

    /// Wait until the network reports the transaction as included or failed.
    async fn wait_for_transaction(&self, hash: TxHash) -> ProviderResult<TxOutcome>;

    /// Provider name for logging.
    fn name(&self) -> &'static str;
}

/// The execution environment a wallet provider may be injected into.
pub trait WalletEnvironment: Send + Sync {
    /// The injected provider, if one is present right now.
    fn provider(&self) -> Option<Arc<dyn WalletProvider>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_codes() {
        assert!(ProviderError::user_rejected().is_user_rejection());
        assert!(ProviderError::unrecognized_chain(4).is_unrecognized_chain());
        assert!(!ProviderError::internal("x").is_user_rejection());
    }

    #[test]
    fn unrecognized_chain_message_uses_hex_id() {
        let err = ProviderError::unrecognized_chain(4);
        assert_eq!(err.to_string(), "provider error 4902: unrecognized chain id 0x4");
    }
}
