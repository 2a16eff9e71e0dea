//! Mock wallet provider and environment.
//!
//! - [`ScriptedWallet`] - A [`WalletProvider`] with a default happy-path
//!   behaviour and per-method queues of scripted results. Each call pops the
//!   next scripted result for its method and falls back to the default when
//!   the queue is empty.
//! - [`StaticEnvironment`] - A [`WalletEnvironment`] whose provider can be
//!   installed or removed at runtime.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use alloy_primitives::{keccak256, Address, TxHash};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use tokio::sync::Notify;

use super::chain::Ledger;
use super::config::account;
use crate::domain::{AssetParams, ChainParams};
use crate::port::{
    IRewardToken, ProviderError, ProviderResult, TransactionRequest, TxOutcome, WalletEnvironment,
    WalletProvider,
};

/// Number of calls made to each provider method.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CallCounts {
    pub request_accounts: u32,
    pub chain_id: u32,
    pub switch_chain: u32,
    pub add_chain: u32,
    pub watch_asset: u32,
    pub send_transaction: u32,
    pub wait_for_transaction: u32,
}

/// A wallet provider with scripted answers.
///
/// Defaults: hands out [`account()`], starts on chain 4, knows every chain,
/// accepts every request and includes every transaction. With a
/// [`Ledger`] attached, an included `mint(to, amount)` credits `to`.
pub struct ScriptedWallet {
    accounts: Vec<Address>,
    active_chain: Mutex<u64>,
    /// `None` means every chain is known.
    known_chains: Mutex<Option<HashSet<u64>>>,
    registers_added_chains: bool,
    ledger: Option<Arc<Ledger>>,
    holds_confirmations: bool,

    account_results: Mutex<VecDeque<ProviderResult<Vec<Address>>>>,
    switch_results: Mutex<VecDeque<ProviderResult<()>>>,
    add_chain_results: Mutex<VecDeque<ProviderResult<()>>>,
    watch_results: Mutex<VecDeque<ProviderResult<bool>>>,
    send_results: Mutex<VecDeque<ProviderResult<TxHash>>>,
    outcomes: Mutex<VecDeque<ProviderResult<TxOutcome>>>,

    calls: Mutex<CallCounts>,
    added_chains: Mutex<Vec<ChainParams>>,
    watched_assets: Mutex<Vec<AssetParams>>,
    sent: Mutex<Vec<TransactionRequest>>,
    submitted: Mutex<HashMap<TxHash, TransactionRequest>>,
    nonce: AtomicU64,

    confirmation_requested: Notify,
    confirmation_released: Notify,
}

impl Default for ScriptedWallet {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedWallet {
    pub fn new() -> Self {
        Self {
            accounts: vec![account()],
            active_chain: Mutex::new(4),
            known_chains: Mutex::new(None),
            registers_added_chains: true,
            ledger: None,
            holds_confirmations: false,
            account_results: Mutex::new(VecDeque::new()),
            switch_results: Mutex::new(VecDeque::new()),
            add_chain_results: Mutex::new(VecDeque::new()),
            watch_results: Mutex::new(VecDeque::new()),
            send_results: Mutex::new(VecDeque::new()),
            outcomes: Mutex::new(VecDeque::new()),
            calls: Mutex::new(CallCounts::default()),
            added_chains: Mutex::new(Vec::new()),
            watched_assets: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            submitted: Mutex::new(HashMap::new()),
            nonce: AtomicU64::new(0),
            confirmation_requested: Notify::new(),
            confirmation_released: Notify::new(),
        }
    }

    /// Start on `chain_id`.
    pub fn on_chain(mut self, chain_id: u64) -> Self {
        *self.active_chain.get_mut() = chain_id;
        self
    }

    /// Only know `chains`; switching elsewhere fails with 4902 until the
    /// chain is added.
    pub fn knowing(mut self, chains: &[u64]) -> Self {
        *self.known_chains.get_mut() = Some(chains.iter().copied().collect());
        self
    }

    /// Accept `add_chain` requests without actually learning the chain.
    pub fn ignoring_added_chains(mut self) -> Self {
        self.registers_added_chains = false;
        self
    }

    /// Credit confirmed mints to `ledger`.
    pub fn with_ledger(mut self, ledger: Arc<Ledger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Block every confirmation wait until [`release_confirmation`](Self::release_confirmation).
    pub fn holding_confirmations(mut self) -> Self {
        self.holds_confirmations = true;
        self
    }

    pub fn push_account_result(&self, result: ProviderResult<Vec<Address>>) {
        self.account_results.lock().push_back(result);
    }

    pub fn push_switch_result(&self, result: ProviderResult<()>) {
        self.switch_results.lock().push_back(result);
    }

    pub fn push_add_chain_result(&self, result: ProviderResult<()>) {
        self.add_chain_results.lock().push_back(result);
    }

    pub fn push_watch_result(&self, result: ProviderResult<bool>) {
        self.watch_results.lock().push_back(result);
    }

    pub fn push_send_result(&self, result: ProviderResult<TxHash>) {
        self.send_results.lock().push_back(result);
    }

    pub fn push_outcome(&self, result: ProviderResult<TxOutcome>) {
        self.outcomes.lock().push_back(result);
    }

    pub fn calls(&self) -> CallCounts {
        *self.calls.lock()
    }

    pub fn added_chains(&self) -> Vec<ChainParams> {
        self.added_chains.lock().clone()
    }

    pub fn watched_assets(&self) -> Vec<AssetParams> {
        self.watched_assets.lock().clone()
    }

    pub fn sent_transactions(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }

    pub fn active_chain(&self) -> u64 {
        *self.active_chain.lock()
    }

    /// Change the active network from the wallet side, as a user would.
    pub fn set_active_chain(&self, chain_id: u64) {
        *self.active_chain.lock() = chain_id;
    }

    /// Resolve once a confirmation wait has started. Only meaningful with
    /// [`holding_confirmations`](Self::holding_confirmations).
    pub async fn wait_for_confirmation_request(&self) {
        self.confirmation_requested.notified().await;
    }

    /// Let one held confirmation wait proceed.
    pub fn release_confirmation(&self) {
        self.confirmation_released.notify_one();
    }

    fn knows(&self, chain_id: u64) -> bool {
        self.known_chains
            .lock()
            .as_ref()
            .map_or(true, |known| known.contains(&chain_id))
    }

    fn next_hash(&self) -> TxHash {
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst);
        keccak256(nonce.to_be_bytes())
    }

    /// Apply an included mint to the ledger.
    fn settle(&self, hash: TxHash) {
        let (Some(ledger), Some(tx)) = (&self.ledger, self.submitted.lock().remove(&hash)) else {
            return;
        };
        if let Ok(call) = IRewardToken::mintCall::abi_decode(&tx.data) {
            ledger.credit_tokens(call.to, call.amount);
        }
    }
}

#[async_trait]
impl WalletProvider for ScriptedWallet {
    async fn request_accounts(&self) -> ProviderResult<Vec<Address>> {
        self.calls.lock().request_accounts += 1;
        let scripted = self.account_results.lock().pop_front();
        scripted.unwrap_or_else(|| Ok(self.accounts.clone()))
    }

    async fn chain_id(&self) -> ProviderResult<u64> {
        self.calls.lock().chain_id += 1;
        Ok(self.active_chain())
    }

    async fn switch_chain(&self, chain_id: u64) -> ProviderResult<()> {
        self.calls.lock().switch_chain += 1;
        let scripted = self.switch_results.lock().pop_front();
        let result = scripted.unwrap_or_else(|| {
            if self.knows(chain_id) {
                Ok(())
            } else {
                Err(ProviderError::unrecognized_chain(chain_id))
            }
        });
        if result.is_ok() {
            self.set_active_chain(chain_id);
        }
        result
    }

    async fn add_chain(&self, params: &ChainParams) -> ProviderResult<()> {
        self.calls.lock().add_chain += 1;
        self.added_chains.lock().push(params.clone());
        if let Some(result) = self.add_chain_results.lock().pop_front() {
            result?;
        }

        let chain_id = u64::from_str_radix(params.chain_id.trim_start_matches("0x"), 16)
            .map_err(|e| ProviderError::new(-32602, format!("invalid chainId: {e}")))?;
        if self.registers_added_chains {
            if let Some(known) = self.known_chains.lock().as_mut() {
                known.insert(chain_id);
            }
        }
        Ok(())
    }

    async fn watch_asset(&self, params: &AssetParams) -> ProviderResult<bool> {
        self.calls.lock().watch_asset += 1;
        self.watched_assets.lock().push(params.clone());
        let scripted = self.watch_results.lock().pop_front();
        scripted.unwrap_or(Ok(true))
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> ProviderResult<TxHash> {
        self.calls.lock().send_transaction += 1;
        self.sent.lock().push(tx.clone());
        let scripted = self.send_results.lock().pop_front();
        let hash = scripted.unwrap_or_else(|| Ok(self.next_hash()))?;
        self.submitted.lock().insert(hash, tx);
        Ok(hash)
    }

    async fn wait_for_transaction(&self, hash: TxHash) -> ProviderResult<TxOutcome> {
        self.calls.lock().wait_for_transaction += 1;
        if self.holds_confirmations {
            self.confirmation_requested.notify_one();
            self.confirmation_released.notified().await;
        }

        let scripted = self.outcomes.lock().pop_front();
        let outcome = scripted.unwrap_or(Ok(TxOutcome::Included {
            block_number: Some(1),
        }));
        if let Ok(TxOutcome::Included { .. }) = outcome {
            self.settle(hash);
        }
        outcome
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// An environment whose provider can come and go.
#[derive(Default)]
pub struct StaticEnvironment {
    provider: RwLock<Option<Arc<dyn WalletProvider>>>,
}

impl StaticEnvironment {
    /// No provider installed.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider: RwLock::new(Some(provider)),
        }
    }

    pub fn install(&self, provider: Arc<dyn WalletProvider>) {
        *self.provider.write() = Some(provider);
    }

    pub fn remove(&self) {
        *self.provider.write() = None;
    }
}

impl WalletEnvironment for StaticEnvironment {
    fn provider(&self) -> Option<Arc<dyn WalletProvider>> {
        self.provider.read().clone()
    }
}
