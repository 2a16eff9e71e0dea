//! The single network the claim flow operates on.

use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters used to register a chain with a wallet (EIP-3085 shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    /// Chain id as a `0x`-prefixed hex string.
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
}

/// Native currency descriptor carried in [`ChainParams`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// The target network: every other chain is treated as out of scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetNetwork {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: Url,
    pub currency_symbol: String,
}

impl TargetNetwork {
    /// Whether `chain_id` is this network.
    #[must_use]
    pub fn is_target(&self, chain_id: Option<u64>) -> bool {
        chain_id == Some(self.chain_id)
    }

    /// Chain id in the hex form wallets expect (`4` -> `"0x4"`).
    #[must_use]
    pub fn hex_chain_id(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    /// Registration parameters for wallets that do not know this chain.
    #[must_use]
    pub fn chain_params(&self) -> ChainParams {
        ChainParams {
            chain_id: self.hex_chain_id(),
            chain_name: self.name.clone(),
            rpc_urls: vec![self.rpc_url.to_string()],
            native_currency: NativeCurrency {
                name: self.currency_symbol.clone(),
                symbol: self.currency_symbol.clone(),
                decimals: 18,
            },
        }
    }
}
