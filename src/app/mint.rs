//! Mint orchestration.
//!
//! Drives one [`MintOperation`] from request to a terminal state:
//!
//! 1. Pre-checks (provider present, target network, nothing outstanding)
//!    reject the request without creating an operation.
//! 2. The wallet signs and submits `mint(account, amount)`. A rejected
//!    signature fails the operation with no hash.
//! 3. The returned hash moves the operation to `Submitted` and straight on
//!    to `Pending`.
//! 4. Inclusion confirms it and triggers one balance read; a revert or drop
//!    fails it. There is no automatic retry.
//!
//! If the caller drops the request future before step 4 finishes, the
//! operation is failed as abandoned so the slot frees up.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::balance::BalanceReader;
use super::detector::require_provider;
use crate::domain::{
    to_base_units, DomainError, MintFailure, MintOperation, TargetNetwork, TokenInfo,
};
use crate::error::ClaimError;
use crate::port::{RewardToken, TxOutcome, WalletEnvironment, WalletProvider};

/// Submits mint transactions and tracks them to completion.
///
/// Holds at most one operation at a time. While it is not terminal, further
/// requests fail with [`ClaimError::OperationInProgress`].
pub struct MintOrchestrator {
    environment: Arc<dyn WalletEnvironment>,
    token: Arc<dyn RewardToken>,
    balances: Arc<BalanceReader>,
    network: TargetNetwork,
    amount: Decimal,
    amount_units: U256,
    confirmation_timeout: Option<Duration>,
    current: RwLock<Option<MintOperation>>,
}

impl MintOrchestrator {
    /// Create an orchestrator minting `amount` whole tokens per request.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `amount` cannot be expressed in base units.
    pub fn new(
        environment: Arc<dyn WalletEnvironment>,
        token: Arc<dyn RewardToken>,
        balances: Arc<BalanceReader>,
        network: TargetNetwork,
        amount: Decimal,
    ) -> Result<Self, DomainError> {
        let amount_units = to_base_units(amount, u32::from(token.info().decimals))?;
        Ok(Self {
            environment,
            token,
            balances,
            network,
            amount,
            amount_units,
            confirmation_timeout: None,
            current: RwLock::new(None),
        })
    }

    /// Bound the confirmation wait. Without it the wait never times out.
    #[must_use]
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// The current (or last) operation.
    pub fn current(&self) -> Option<MintOperation> {
        self.current.read().clone()
    }

    /// Whether an operation is outstanding.
    pub fn is_busy(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(|op| !op.state().is_terminal())
    }

    pub fn token(&self) -> &TokenInfo {
        self.token.info()
    }

    /// Mint the configured amount to `account` and wait for the outcome.
    ///
    /// Returns the operation in its terminal state; failures after the
    /// pre-checks are recorded on the operation, not returned as errors.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::ProviderUnavailable`] if no wallet is present
    /// - [`ClaimError::NotOnTargetNetwork`] if `network_id` is not the target
    /// - [`ClaimError::OperationInProgress`] if a mint is outstanding
    pub async fn request_mint(
        &self,
        account: Address,
        network_id: u64,
    ) -> Result<MintOperation, ClaimError> {
        let provider = require_provider(self.environment.as_ref())?;

        if !self.network.is_target(Some(network_id)) {
            return Err(ClaimError::NotOnTargetNetwork {
                expected: self.network.chain_id,
                actual: Some(network_id),
            });
        }

        let (mut op, _guard) = self.begin(account)?;
        let id = op.id();
        info!(
            operation = %id,
            account = %account,
            amount = %self.amount,
            "Requesting mint signature"
        );

        let hash = match self
            .token
            .mint(provider.as_ref(), account, account, self.amount_units)
            .await
        {
            Ok(hash) => hash,
            Err(e) => {
                let failure = if e.is_user_rejection() {
                    MintFailure::UserRejected
                } else {
                    MintFailure::Provider {
                        code: e.code,
                        message: e.message,
                    }
                };
                warn!(operation = %id, failure = %failure, "Mint submission failed");
                self.advance(&mut op, |op| op.mark_failed(failure));
                return Ok(op);
            }
        };

        self.advance(&mut op, |op| {
            op.mark_submitted(hash)?;
            op.mark_pending()
        });
        info!(operation = %id, tx_hash = %hash, "Mint pending confirmation");

        match self.await_confirmation(provider.as_ref(), hash).await {
            Ok(()) => {
                let snapshot = self.balances.read_balances(account, network_id).await;
                info!(
                    operation = %id,
                    tx_hash = %hash,
                    token_balance = %snapshot.token_balance,
                    "Mint confirmed"
                );
                self.advance(&mut op, |op| op.mark_confirmed(snapshot));
            }
            Err(failure) => {
                warn!(operation = %id, tx_hash = %hash, failure = %failure, "Mint failed");
                self.advance(&mut op, |op| op.mark_failed(failure));
            }
        }
        Ok(op)
    }

    /// Install a fresh operation unless one is outstanding.
    ///
    /// The guard must live until the operation is terminal.
    fn begin(&self, account: Address) -> Result<(MintOperation, SlotGuard<'_>), ClaimError> {
        let mut current = self.current.write();
        if current.as_ref().is_some_and(|op| !op.state().is_terminal()) {
            return Err(ClaimError::OperationInProgress);
        }

        let op = MintOperation::new(account, self.amount, self.amount_units);
        *current = Some(op.clone());
        let guard = SlotGuard {
            slot: &self.current,
            id: op.id(),
        };
        Ok((op, guard))
    }

    async fn await_confirmation(
        &self,
        provider: &dyn WalletProvider,
        hash: TxHash,
    ) -> Result<(), MintFailure> {
        let wait = provider.wait_for_transaction(hash);
        let outcome = match self.confirmation_timeout {
            Some(limit) => tokio::time::timeout(limit, wait)
                .await
                .map_err(|_| MintFailure::TimedOut)?,
            None => wait.await,
        };

        match outcome {
            Ok(TxOutcome::Included { .. }) => Ok(()),
            Ok(TxOutcome::Reverted) => Err(MintFailure::TransactionReverted),
            Err(e) => {
                warn!(tx_hash = %hash, code = e.code, error = %e.message, "Confirmation wait failed");
                Err(MintFailure::TransactionReverted)
            }
        }
    }

    /// Apply `change` to `op` and publish the result.
    ///
    /// Only the request that began `op` writes the slot while it is
    /// outstanding, so publishing never clobbers another operation.
    fn advance<F>(&self, op: &mut MintOperation, change: F)
    where
        F: FnOnce(&mut MintOperation) -> Result<(), DomainError>,
    {
        if let Err(e) = change(op) {
            warn!(operation = %op.id(), error = %e, "Ignoring invalid mint transition");
        }
        *self.current.write() = Some(op.clone());
    }
}

/// Fails the slot's operation if its request is dropped mid-flight.
struct SlotGuard<'a> {
    slot: &'a RwLock<Option<MintOperation>>,
    id: Uuid,
}

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        let mut current = self.slot.write();
        let Some(op) = current.as_mut().filter(|op| op.id() == self.id) else {
            return;
        };
        if op.state().is_terminal() {
            return;
        }
        if op.mark_failed(MintFailure::Abandoned).is_ok() {
            warn!(
                operation = %self.id,
                tx_hash = ?op.tx_hash(),
                "Mint request dropped before completion"
            );
        }
    }
}
