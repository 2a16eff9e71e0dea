//! Reward token description.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Token asset a wallet can be asked to track (EIP-747 shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    /// Asset standard, `"ERC20"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub options: AssetOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetOptions {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The reward token contract and its display metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub image: Option<String>,
}

impl TokenInfo {
    /// Parameters for asking the wallet to track this token.
    #[must_use]
    pub fn asset_params(&self) -> AssetParams {
        AssetParams {
            kind: "ERC20".into(),
            options: AssetOptions {
                address: self.address,
                symbol: self.symbol.clone(),
                decimals: self.decimals,
                image: self.image.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn asset_params_use_erc20_type() {
        let token = TokenInfo {
            address: address!("23c9bbd98d4f4e0f79f4a7f8a28c06674771b9d4"),
            symbol: "BSC".into(),
            decimals: 18,
            image: None,
        };

        let json = serde_json::to_value(token.asset_params()).unwrap();
        assert_eq!(json["type"], "ERC20");
        assert_eq!(json["options"]["symbol"], "BSC");
        assert_eq!(json["options"]["decimals"], 18);
        assert!(json["options"].get("image").is_none());
    }
}
