//! Read-only JSON-RPC access to the target network.

use alloy_primitives::{Address, U256};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_sol_types::sol;
use async_trait::async_trait;
use url::Url;

use crate::domain::TokenInfo;
use crate::error::{Error, Result};
use crate::port::{ChainReader, RewardToken};

// Reward token interface (read side only; mints go through the wallet)
sol! {
    #[sol(rpc)]
    contract RewardTokenReader {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// Native balances over plain HTTP JSON-RPC.
pub struct RpcChainReader {
    rpc_url: Url,
}

impl RpcChainReader {
    pub fn new(rpc_url: Url) -> Self {
        Self { rpc_url }
    }
}

#[async_trait]
impl ChainReader for RpcChainReader {
    async fn native_balance(&self, account: Address) -> Result<U256> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        provider
            .get_balance(account)
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get native balance: {e}")))
    }
}

/// The reward-token contract over plain HTTP JSON-RPC.
pub struct RpcRewardToken {
    rpc_url: Url,
    info: TokenInfo,
}

impl RpcRewardToken {
    pub fn new(rpc_url: Url, info: TokenInfo) -> Self {
        Self { rpc_url, info }
    }
}

#[async_trait]
impl RewardToken for RpcRewardToken {
    fn info(&self) -> &TokenInfo {
        &self.info
    }

    async fn balance_of(&self, account: Address) -> Result<U256> {
        let provider = ProviderBuilder::new().connect_http(self.rpc_url.clone());
        let token = RewardTokenReader::new(self.info.address, &provider);

        let balance: U256 = token
            .balanceOf(account)
            .call()
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get token balance: {e}")))?;
        Ok(balance)
    }
}
