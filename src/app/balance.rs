//! Balance reads for a connected account.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::domain::{
    to_whole_units, BalanceKind, BalanceReadDegraded, BalanceSnapshot, TargetNetwork,
    TOKEN_DECIMALS,
};
use crate::error::Result;
use crate::port::{ChainReader, RewardToken};

/// Reads native and token balances into a [`BalanceSnapshot`].
///
/// Pure read path: nothing is cached, overlapping calls are independent.
/// Only the target network is priced; any other network reads as zero.
pub struct BalanceReader {
    chain: Arc<dyn ChainReader>,
    token: Arc<dyn RewardToken>,
    network: TargetNetwork,
}

impl BalanceReader {
    pub fn new(
        chain: Arc<dyn ChainReader>,
        token: Arc<dyn RewardToken>,
        network: TargetNetwork,
    ) -> Self {
        Self {
            chain,
            token,
            network,
        }
    }

    /// Read both balances for `account` on `network_id`.
    ///
    /// Never fails: a sub-read that errors is logged, recorded on the
    /// snapshot as [`BalanceReadDegraded`], and reported as zero.
    pub async fn read_balances(&self, account: Address, network_id: u64) -> BalanceSnapshot {
        let mut snapshot = BalanceSnapshot::zero(account, network_id);

        if !self.network.is_target(Some(network_id)) {
            debug!(
                account = %account,
                network_id,
                target = self.network.chain_id,
                "Off-target network, balances read as zero"
            );
            return snapshot;
        }

        let (native, token) = tokio::join!(
            self.chain.native_balance(account),
            self.token.balance_of(account)
        );

        snapshot.native_balance =
            settle(BalanceKind::Native, native, TOKEN_DECIMALS, &mut snapshot.degraded);
        snapshot.token_balance = settle(
            BalanceKind::Token,
            token,
            u32::from(self.token.info().decimals),
            &mut snapshot.degraded,
        );

        debug!(
            account = %account,
            native = %snapshot.native_balance,
            token = %snapshot.token_balance,
            degraded = snapshot.degraded.len(),
            "Balances read"
        );
        snapshot
    }
}

/// Convert a base-unit read to whole units, degrading to zero on failure.
fn settle(
    kind: BalanceKind,
    read: Result<U256>,
    decimals: u32,
    degraded: &mut Vec<BalanceReadDegraded>,
) -> Decimal {
    let converted = read.and_then(|units| to_whole_units(units, decimals).map_err(Into::into));

    match converted {
        Ok(amount) => amount,
        Err(e) => {
            warn!(kind = %kind, error = %e, "Balance read failed, falling back to zero");
            degraded.push(BalanceReadDegraded {
                kind,
                reason: e.to_string(),
            });
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::chain::{Ledger, LedgerToken, StaticChain};
    use crate::testkit::config::{account, ether, rinkeby, token_info};
    use rust_decimal_macros::dec;

    fn reader(ledger: &Arc<Ledger>) -> (BalanceReader, Arc<StaticChain>, Arc<LedgerToken>) {
        let chain = Arc::new(StaticChain::new(ledger.clone()));
        let token = Arc::new(LedgerToken::new(ledger.clone(), token_info()));
        let reader = BalanceReader::new(chain.clone(), token.clone(), rinkeby());
        (reader, chain, token)
    }

    #[tokio::test]
    async fn reads_both_balances_on_target_network() {
        let ledger = Arc::new(Ledger::default());
        ledger.set_native(account(), ether(2));
        ledger.set_tokens(account(), ether(1000));
        let (reader, _, _) = reader(&ledger);

        let snapshot = reader.read_balances(account(), 4).await;
        assert_eq!(snapshot.native_balance, dec!(2));
        assert_eq!(snapshot.token_balance, dec!(1000));
        assert!(!snapshot.is_degraded());
        assert_eq!(snapshot.account, account());
        assert_eq!(snapshot.network_id, 4);
    }

    #[tokio::test]
    async fn off_target_network_reads_zero_without_queries() {
        let ledger = Arc::new(Ledger::default());
        ledger.set_native(account(), ether(2));
        ledger.set_tokens(account(), ether(5));
        let (reader, chain, token) = reader(&ledger);

        let snapshot = reader.read_balances(account(), 1).await;
        assert_eq!(snapshot.native_balance, Decimal::ZERO);
        assert_eq!(snapshot.token_balance, Decimal::ZERO);
        assert_eq!(chain.reads(), 0);
        assert_eq!(token.reads(), 0);
    }

    #[tokio::test]
    async fn failed_token_read_degrades_to_zero() {
        let ledger = Arc::new(Ledger::default());
        ledger.set_native(account(), ether(1));
        let (reader, _, token) = reader(&ledger);
        token.fail_reads(true);

        let snapshot = reader.read_balances(account(), 4).await;
        assert_eq!(snapshot.native_balance, dec!(1));
        assert_eq!(snapshot.token_balance, Decimal::ZERO);
        assert_eq!(snapshot.degraded.len(), 1);
        assert_eq!(snapshot.degraded[0].kind, BalanceKind::Token);
    }

    #[tokio::test]
    async fn failed_native_read_degrades_to_zero() {
        let ledger = Arc::new(Ledger::default());
        ledger.set_tokens(account(), ether(3));
        let (reader, chain, _) = reader(&ledger);
        chain.fail_reads(true);

        let snapshot = reader.read_balances(account(), 4).await;
        assert_eq!(snapshot.native_balance, Decimal::ZERO);
        assert_eq!(snapshot.token_balance, dec!(3));
        assert_eq!(snapshot.degraded[0].kind, BalanceKind::Native);
    }

    #[tokio::test]
    async fn unrepresentable_balance_degrades_to_zero() {
        let ledger = Arc::new(Ledger::default());
        ledger.set_tokens(account(), U256::MAX);
        let (reader, _, _) = reader(&ledger);

        let snapshot = reader.read_balances(account(), 4).await;
        assert_eq!(snapshot.token_balance, Decimal::ZERO);
        assert!(snapshot.is_degraded());
    }
}
