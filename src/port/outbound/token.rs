//! Reward-token contract port.
//!
//! Reads go through a read-only connection; the mint write is encoded here
//! and handed to the wallet provider for signing.

use alloy_primitives::{Address, Bytes, TxHash, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use super::wallet::{ProviderResult, TransactionRequest, WalletProvider};
use crate::domain::TokenInfo;
use crate::error::Result;

// Reward token interface (minimal for claiming)
sol! {
    interface IRewardToken {
        function balanceOf(address account) external view returns (uint256);
        function mint(address to, uint256 amount) external;
    }
}

/// Calldata for `mint(to, amount)`.
#[must_use]
pub fn mint_calldata(to: Address, amount: U256) -> Bytes {
    Bytes::from(IRewardToken::mintCall { to, amount }.abi_encode())
}

/// Port for the reward-token contract.
#[async_trait]
pub trait RewardToken: Send + Sync {
    /// Contract address and display metadata.
    fn info(&self) -> &TokenInfo;

    /// Token balance of `account`, in base units. No signing involved.
    ///
    /// # Errors
    ///
    /// Returns an error if the contract call fails.
    async fn balance_of(&self, account: Address) -> Result<U256>;

    /// Submit `mint(to, amount)` from `from` through `wallet`.
    ///
    /// Resolves with the transaction hash once the wallet accepts the
    /// submission; confirmation is awaited separately through the wallet.
    async fn mint(
        &self,
        wallet: &dyn WalletProvider,
        from: Address,
        to: Address,
        amount: U256,
    ) -> ProviderResult<TxHash> {
        let tx = TransactionRequest {
            from,
            to: self.info().address,
            data: mint_calldata(to, amount),
            value: U256::ZERO,
        };
        wallet.send_transaction(tx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn mint_calldata_starts_with_selector() {
        let data = mint_calldata(
            address!("00000000000000000000000000000000000000aa"),
            U256::from(1u8),
        );
        assert_eq!(&data[..4], IRewardToken::mintCall::SELECTOR.as_slice());
        // selector + two 32-byte words
        assert_eq!(data.len(), 4 + 64);
    }

    #[test]
    fn mint_calldata_decodes_back() {
        let to = address!("00000000000000000000000000000000000000aa");
        let amount = U256::from(1_000u64);
        let call = IRewardToken::mintCall::abi_decode(&mint_calldata(to, amount)).unwrap();
        assert_eq!(call.to, to);
        assert_eq!(call.amount, amount);
    }
}
