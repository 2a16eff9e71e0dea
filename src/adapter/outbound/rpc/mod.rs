//! JSON-RPC adapters: read-only chain and token access plus a headless
//! wallet that signs with a local key.

mod chain;
mod wallet;

use std::sync::Arc;

use tracing::info;

pub use chain::{RpcChainReader, RpcRewardToken};
pub use wallet::{LocalEnvironment, LocalWallet};

use crate::app::{ClaimController, Config};
use crate::error::Result;

/// Build a claim controller wired to live RPC adapters.
///
/// Without `WALLET_PRIVATE_KEY` the controller starts with no wallet
/// provider, the same as a browser without an extension.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the wallet cannot
/// reach its RPC endpoint.
pub async fn connect(config: &Config) -> Result<ClaimController> {
    let settings = config.settings()?;
    let rpc_url = settings.network.rpc_url.clone();

    let wallet = match config.wallet.private_key.as_deref() {
        Some(key) => Some(Arc::new(LocalWallet::connect(key, rpc_url.clone()).await?)),
        None => {
            info!("No wallet key configured, running without a provider");
            None
        }
    };

    let chain = Arc::new(RpcChainReader::new(rpc_url.clone()));
    let token = Arc::new(RpcRewardToken::new(rpc_url, settings.token.clone()));
    let environment = Arc::new(LocalEnvironment::new(wallet));

    ClaimController::new(settings, environment, chain, token)
}
