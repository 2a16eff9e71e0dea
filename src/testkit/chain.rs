//! In-memory chain state and the read-only ports backed by it.
//!
//! - [`Ledger`] - Native and token balances per account, shared by the
//!   readers below and by [`ScriptedWallet`](super::wallet::ScriptedWallet),
//!   which credits minted tokens on confirmation.
//! - [`StaticChain`] - [`ChainReader`] over the ledger's native balances.
//! - [`LedgerToken`] - [`RewardToken`] over the ledger's token balances.
//!
//! Both readers count their calls and can be told to fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::TokenInfo;
use crate::error::{Error, Result};
use crate::port::{ChainReader, RewardToken};

/// Balances per account, in base units.
#[derive(Debug, Default)]
pub struct Ledger {
    native: Mutex<HashMap<Address, U256>>,
    tokens: Mutex<HashMap<Address, U256>>,
}

impl Ledger {
    pub fn set_native(&self, account: Address, amount: U256) {
        self.native.lock().insert(account, amount);
    }

    pub fn set_tokens(&self, account: Address, amount: U256) {
        self.tokens.lock().insert(account, amount);
    }

    pub fn native(&self, account: Address) -> U256 {
        self.native.lock().get(&account).copied().unwrap_or_default()
    }

    pub fn tokens(&self, account: Address) -> U256 {
        self.tokens.lock().get(&account).copied().unwrap_or_default()
    }

    /// Add `amount` to the token balance of `account`.
    pub fn credit_tokens(&self, account: Address, amount: U256) {
        let mut tokens = self.tokens.lock();
        let balance = tokens.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }
}

/// [`ChainReader`] answering from a [`Ledger`].
pub struct StaticChain {
    ledger: Arc<Ledger>,
    reads: AtomicU32,
    failing: AtomicBool,
}

impl StaticChain {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            ledger,
            reads: AtomicU32::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of balance reads served (including failed ones).
    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChainReader for StaticChain {
    async fn native_balance(&self, account: Address) -> Result<U256> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Rpc("scripted native balance failure".into()));
        }
        Ok(self.ledger.native(account))
    }
}

/// [`RewardToken`] answering from a [`Ledger`]. Mints go through the
/// trait's default implementation, so they reach the wallet as calldata.
pub struct LedgerToken {
    ledger: Arc<Ledger>,
    info: TokenInfo,
    reads: AtomicU32,
    failing: AtomicBool,
}

impl LedgerToken {
    pub fn new(ledger: Arc<Ledger>, info: TokenInfo) -> Self {
        Self {
            ledger,
            info,
            reads: AtomicU32::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// Number of `balance_of` calls served (including failed ones).
    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn fail_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl RewardToken for LedgerToken {
    fn info(&self) -> &TokenInfo {
        &self.info
    }

    async fn balance_of(&self, account: Address) -> Result<U256> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Rpc("scripted balanceOf failure".into()));
        }
        Ok(self.ledger.tokens(account))
    }
}
