//! Read-only chain connection port.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;

use crate::error::Result;

/// Port for reading native balances on the target network, independent of
/// the wallet provider.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native-currency balance of `account`, in base units.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn native_balance(&self, account: Address) -> Result<U256>;
}
