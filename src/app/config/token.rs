//! Reward token and mint configuration.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::{to_base_units, TokenInfo, TOKEN_DECIMALS};
use crate::error::{ConfigError, Result};

/// Baker Street Coin contract on Rinkeby.
const DEFAULT_TOKEN_ADDRESS: &str = "0x23c9bbd98d4f4e0f79f4a7f8a28c06674771b9d4";

/// Longest symbol wallets accept when tracking an asset.
const MAX_SYMBOL_LEN: usize = 11;

/// Reward token contract and display metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Icon URL passed to the wallet when tracking the token.
    #[serde(default)]
    pub image: Option<String>,
}

fn default_address() -> String {
    DEFAULT_TOKEN_ADDRESS.into()
}

fn default_symbol() -> String {
    "BSC".into()
}

#[allow(clippy::cast_possible_truncation)]
const fn default_decimals() -> u8 {
    TOKEN_DECIMALS as u8
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            symbol: default_symbol(),
            decimals: default_decimals(),
            image: None,
        }
    }
}

impl TokenConfig {
    /// Validate and build the domain token description.
    #[allow(clippy::result_large_err)]
    pub fn token_info(&self) -> Result<TokenInfo> {
        let address = Address::from_str(&self.address).map_err(|e| ConfigError::InvalidValue {
            field: "token.address",
            reason: e.to_string(),
        })?;

        let symbol = self.symbol.trim();
        if symbol.is_empty() || symbol.len() > MAX_SYMBOL_LEN {
            return Err(ConfigError::InvalidValue {
                field: "token.symbol",
                reason: format!("must be 1-{MAX_SYMBOL_LEN} characters"),
            }
            .into());
        }

        Ok(TokenInfo {
            address,
            symbol: symbol.to_string(),
            decimals: self.decimals,
            image: self.image.clone(),
        })
    }
}

/// Mint request parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct MintConfig {
    /// Tokens minted per request, in whole units.
    #[serde(default = "default_amount")]
    pub amount: Decimal,
    /// Upper bound on the confirmation wait. Absent or zero waits forever.
    #[serde(default)]
    pub confirmation_timeout_secs: Option<u64>,
}

fn default_amount() -> Decimal {
    dec!(1000)
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            confirmation_timeout_secs: None,
        }
    }
}

impl MintConfig {
    #[allow(clippy::result_large_err)]
    pub fn validate(&self, decimals: u8) -> Result<()> {
        if self.amount <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "mint.amount",
                reason: "must be positive".into(),
            }
            .into());
        }
        let units =
            to_base_units(self.amount, u32::from(decimals)).map_err(|e| ConfigError::InvalidValue {
                field: "mint.amount",
                reason: e.to_string(),
            })?;
        if units.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "mint.amount",
                reason: format!("smaller than one base unit at {decimals} decimals"),
            }
            .into());
        }
        Ok(())
    }

    #[must_use]
    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
