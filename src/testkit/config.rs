//! Canonical test fixtures.
//!
//! Single source of truth for the network, token and account used across
//! tests. Avoids each test module defining its own slightly-different values.

use std::time::Duration;

use alloy_primitives::{address, Address, U256};
use rust_decimal_macros::dec;
use url::Url;

use crate::app::ClaimSettings;
use crate::domain::{TargetNetwork, TokenInfo};

/// The account every scripted wallet hands out.
pub fn account() -> Address {
    address!("00000000000000000000000000000000000000aa")
}

/// Rinkeby, chain 4.
pub fn rinkeby() -> TargetNetwork {
    TargetNetwork {
        chain_id: 4,
        name: "Rinkeby".into(),
        rpc_url: Url::parse("https://rinkeby-light.eth.linkpool.io/").expect("valid url"),
        currency_symbol: "ETH".into(),
    }
}

/// The reward token with 18 decimals.
pub fn token_info() -> TokenInfo {
    TokenInfo {
        address: address!("23c9bbd98d4f4e0f79f4a7f8a28c06674771b9d4"),
        symbol: "BSC".into(),
        decimals: 18,
        image: None,
    }
}

/// `n` whole units at 18 decimals.
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(10u64).pow(U256::from(18u8))
}

/// Settings minting 1000 tokens on Rinkeby with an unbounded confirmation wait.
pub fn settings() -> ClaimSettings {
    ClaimSettings {
        network: rinkeby(),
        token: token_info(),
        mint_amount: dec!(1000),
        confirmation_timeout: None,
    }
}

/// [`settings`] with a bounded confirmation wait.
pub fn settings_with_timeout(timeout: Duration) -> ClaimSettings {
    ClaimSettings {
        confirmation_timeout: Some(timeout),
        ..settings()
    }
}
