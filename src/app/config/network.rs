//! Target network configuration.

use serde::Deserialize;
use url::Url;

use crate::domain::TargetNetwork;
use crate::error::{ConfigError, Result};

/// The single network claims happen on. Defaults to Rinkeby.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    #[serde(default = "default_name")]
    pub name: String,
    /// RPC endpoint for read-only queries and for chain registration.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

const fn default_chain_id() -> u64 {
    4
}

fn default_name() -> String {
    "Rinkeby".into()
}

fn default_rpc_url() -> String {
    "https://rinkeby-light.eth.linkpool.io/".into()
}

fn default_currency_symbol() -> String {
    "ETH".into()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            name: default_name(),
            rpc_url: default_rpc_url(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

impl NetworkConfig {
    /// Validate and build the domain network.
    #[allow(clippy::result_large_err)]
    pub fn target_network(&self) -> Result<TargetNetwork> {
        if self.chain_id == 0 {
            return Err(ConfigError::InvalidValue {
                field: "network.chain_id",
                reason: "must be non-zero".into(),
            }
            .into());
        }
        if self.rpc_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "network.rpc_url",
            }
            .into());
        }
        let rpc_url = Url::parse(&self.rpc_url).map_err(|e| ConfigError::InvalidValue {
            field: "network.rpc_url",
            reason: e.to_string(),
        })?;

        Ok(TargetNetwork {
            chain_id: self.chain_id,
            name: self.name.clone(),
            rpc_url,
            currency_symbol: self.currency_symbol.clone(),
        })
    }
}
