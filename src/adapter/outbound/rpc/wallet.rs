//! Headless wallet backed by a local private key.
//!
//! Behaves like an injected browser wallet from the claim flow's point of
//! view: it owns one account, tracks an active network, only switches to
//! networks it has been told about, and signs transactions itself. There is
//! no user to prompt, so nothing is ever rejected with code 4001.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use alloy_provider::network::{EthereumWallet, ReceiptResponse as _, TransactionBuilder};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest as RpcTransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::{AssetParams, ChainParams};
use crate::error::{ConfigError, Error, Result};
use crate::port::{
    ProviderError, ProviderResult, TransactionRequest, TxOutcome, WalletEnvironment,
    WalletProvider,
};

/// Interval between receipt polls.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Consecutive polls a transaction may be unknown to the node before it is
/// treated as dropped.
const DROPPED_AFTER_POLLS: u32 = 5;

/// Invalid method parameters (JSON-RPC).
const INVALID_PARAMS: i64 = -32602;

/// The requested account is not owned by this wallet (EIP-1193).
const UNAUTHORIZED: i64 = 4100;

/// A wallet that signs with a local key and talks to chains over HTTP.
pub struct LocalWallet {
    signer: PrivateKeySigner,
    /// RPC endpoint per known chain id.
    chains: RwLock<HashMap<u64, Url>>,
    active_chain: RwLock<u64>,
    /// Chain each submitted transaction was sent on.
    submitted: RwLock<HashMap<TxHash, u64>>,
}

impl LocalWallet {
    /// Create a wallet whose active network is whatever `rpc_url` serves.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or invalid, or the endpoint
    /// cannot report its chain id.
    pub async fn connect(private_key: &str, rpc_url: Url) -> Result<Self> {
        if private_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "WALLET_PRIVATE_KEY",
            }
            .into());
        }

        let chain_id = endpoint_chain_id(&rpc_url)
            .await
            .map_err(|e| Error::Rpc(e.message))?;
        let signer = PrivateKeySigner::from_str(private_key.trim())
            .map_err(|e| ConfigError::InvalidValue {
                field: "WALLET_PRIVATE_KEY",
                reason: e.to_string(),
            })?;

        info!(
            address = %signer.address(),
            chain_id,
            "Local wallet ready"
        );

        Ok(Self {
            signer,
            chains: RwLock::new(HashMap::from([(chain_id, rpc_url)])),
            active_chain: RwLock::new(chain_id),
            submitted: RwLock::new(HashMap::new()),
        })
    }

    /// The wallet's only account.
    #[must_use]
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    fn endpoint(&self, chain_id: u64) -> ProviderResult<Url> {
        self.chains
            .read()
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| ProviderError::unrecognized_chain(chain_id))
    }

    /// Endpoint of the chain `hash` was sent on. Hashes this wallet did not
    /// send are looked up on the active chain.
    fn receipt_endpoint(&self, hash: TxHash) -> ProviderResult<Url> {
        let chain_id = self
            .submitted
            .read()
            .get(&hash)
            .copied()
            .unwrap_or_else(|| *self.active_chain.read());
        self.endpoint(chain_id)
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        Ok(vec![self.signer.address()])
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        Ok(*self.active_chain.read())
    }

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()> {
        if !self.chains.read().contains_key(&chain_id) {
            return Err(ProviderError::unrecognized_chain(chain_id));
        }
        *self.active_chain.write() = chain_id;
        debug!(chain_id, "Local wallet switched network");
        Ok(())
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        let chain_id = u64::from_str_radix(params.chain_id.trim_start_matches("0x"), 16)
            .map_err(|e| ProviderError::new(INVALID_PARAMS, format!("invalid chainId: {e}")))?;
        let rpc_url = params
            .rpc_urls
            .first()
            .ok_or_else(|| ProviderError::new(INVALID_PARAMS, "rpcUrls is empty"))
            .and_then(|raw| {
                Url::parse(raw).map_err(|e| {
                    ProviderError::new(INVALID_PARAMS, format!("invalid rpcUrl: {e}"))
                })
            })?;

        let served = endpoint_chain_id(&rpc_url).await?;
        if served != chain_id {
            return Err(ProviderError::new(
                INVALID_PARAMS,
                format!("rpcUrl serves chain {served}, expected {chain_id}"),
            ));
        }

        info!(chain_id, name = %params.chain_name, "Local wallet registered network");
        self.chains.write().insert(chain_id, rpc_url);
        Ok(())
    }

    /// Always accepts; watching an already watched token succeeds again.
    async fn watch_asset(&self, params: &AssetParams) -> ProviderResult<bool> {
        debug!(
            token = %params.options.symbol,
            address = %params.options.address,
            "Local wallet watching asset"
        );
        Ok(true)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        if tx.from != self.signer.address() {
            return Err(ProviderError::new(
                UNAUTHORIZED,
                format!("account {} is not owned by this wallet", tx.from),
            ));
        }

        let chain_id = *self.active_chain.read();
        let rpc_url = self.endpoint(chain_id)?;
        let wallet = EthereumWallet::from(self.signer.clone());
        let provider = ProviderBuilder::new().wallet(wallet).connect_http(rpc_url);

        let request = RpcTransactionRequest::default()
            .with_from(tx.from)
            .with_to(tx.to)
            .with_input(tx.data)
            .with_value(tx.value);

        let pending = provider
            .send_transaction(request)
            .await
            .map_err(|e| ProviderError::internal(format!("Failed to send transaction: {e}")))?;
        let hash = *pending.tx_hash();
        self.submitted.write().insert(hash, chain_id);

        info!(tx_hash = %hash, chain_id, "Transaction submitted");
        Ok(hash)
    }

    async fn wait_for_transaction(&self, hash: TxHash) -> ProviderResult<TxOutcome> {
        let provider = ProviderBuilder::new().connect_http(self.receipt_endpoint(hash)?);
        let outcome = poll_outcome(&provider, hash).await?;
        self.submitted.write().remove(&hash);
        Ok(outcome)
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Poll until `hash` has an outcome; an unknown hash eventually counts as dropped.
async fn poll_outcome<P: Provider>(provider: &P, hash: TxHash) -> ProviderResult<TxOutcome> {
    let mut unknown_polls = 0;

    loop {
        let receipt = provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| ProviderError::internal(format!("Failed to get receipt: {e}")))?;

        if let Some(receipt) = receipt {
            return Ok(if receipt.status() {
                TxOutcome::Included {
                    block_number: receipt.block_number,
                }
            } else {
                TxOutcome::Reverted
            });
        }

        let known = provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| ProviderError::internal(format!("Failed to get transaction: {e}")))?
            .is_some();
        unknown_polls = if known { 0 } else { unknown_polls + 1 };
        if unknown_polls >= DROPPED_AFTER_POLLS {
            warn!(tx_hash = %hash, "Transaction dropped from mempool");
            return Ok(TxOutcome::Reverted);
        }

        tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
    }
}

async fn endpoint_chain_id(rpc_url: &Url) -> ProviderResult<u64> {
    ProviderBuilder::new()
        .connect_http(rpc_url.clone())
        .get_chain_id()
        .await
        .map_err(|e| ProviderError::internal(format!("Failed to get chain id: {e}")))
}

/// Environment holding the local wallet when a key is configured.
///
/// Without a key it reports no provider, which the claim flow surfaces as
/// "install a wallet".
#[derive(Default)]
pub struct LocalEnvironment {
    wallet: Option<Arc<LocalWallet>>,
}

impl LocalEnvironment {
    pub fn new(wallet: Option<Arc<LocalWallet>>) -> Self {
        Self { wallet }
    }
}

impl WalletEnvironment for LocalEnvironment {
    fn provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.wallet
            .clone()
            .map(|wallet| wallet as Arc<dyn WalletProvider>)
    }
}
