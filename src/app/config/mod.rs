//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. The headless wallet's private
//! key comes from the `WALLET_PRIVATE_KEY` environment variable and is never
//! read from the config file. Callers that want a `.env` file honoured call
//! [`Config::load_env_file`] once at startup.

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::{TargetNetwork, TokenInfo};
use crate::error::{ConfigError, Result};

mod logging;
mod network;
mod token;

pub use logging::LoggingConfig;
pub use network::NetworkConfig;
pub use token::{MintConfig, TokenConfig};

/// Key material for the headless wallet adapter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(skip)]
    pub private_key: Option<String>,
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub mint: MintConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
}

/// Validated runtime settings for the claim controller.
#[derive(Debug, Clone)]
pub struct ClaimSettings {
    pub network: TargetNetwork,
    pub token: TokenInfo,
    /// Tokens minted per request, in whole units.
    pub mint_amount: Decimal,
    pub confirmation_timeout: Option<Duration>,
}

impl Config {
    /// Merge a `.env` file from the working directory (or a parent) into the
    /// process environment. Variables already set are left alone; a missing
    /// file is not an error.
    pub fn load_env_file() {
        let _ = dotenvy::dotenv();
    }

    /// Read and validate `path`, taking the wallet key from the process
    /// environment.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;

        // Load private key from environment variable (never from config file for security)
        config.wallet.private_key = std::env::var("WALLET_PRIVATE_KEY").ok();

        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        self.network.target_network()?;
        self.token.token_info()?;
        self.mint.validate(self.token.decimals)?;
        Ok(())
    }

    /// Build the validated runtime settings.
    #[allow(clippy::result_large_err)]
    pub fn settings(&self) -> Result<ClaimSettings> {
        Ok(ClaimSettings {
            network: self.network.target_network()?,
            token: self.token.token_info()?,
            mint_amount: self.mint.amount,
            confirmation_timeout: self.mint.confirmation_timeout(),
        })
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
