//! The onboarding checklist derived from controller state.
//!
//! The claim page walks users through five steps; each is done or pending
//! depending on what the controller currently knows.

use rust_decimal::Decimal;

use super::balance::BalanceSnapshot;
use super::session::{Session, WalletAvailability};

/// Onboarding steps in the order the user completes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    InstallWallet,
    ConnectAccount,
    SwitchNetwork,
    FundGas,
    ClaimTokens,
}

impl OnboardingStep {
    pub const ALL: [Self; 5] = [
        Self::InstallWallet,
        Self::ConnectAccount,
        Self::SwitchNetwork,
        Self::FundGas,
        Self::ClaimTokens,
    ];
}

/// Done/pending status of every step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingProgress {
    done: [bool; 5],
}

impl OnboardingProgress {
    /// Derive progress from the current state.
    ///
    /// Balance steps only count a snapshot that is valid for `session`.
    /// Holding more than one whole token completes the claim step.
    #[must_use]
    pub fn derive(
        availability: WalletAvailability,
        session: &Session,
        on_target: bool,
        balances: Option<&BalanceSnapshot>,
    ) -> Self {
        let balances = balances.filter(|b| b.is_valid_for(session));
        let has_gas = balances.is_some_and(|b| b.native_balance > Decimal::ZERO);
        let has_tokens = balances.is_some_and(|b| b.token_balance > Decimal::ONE);

        Self {
            done: [
                availability.is_available(),
                session.is_connected(),
                session.is_connected() && on_target,
                has_gas,
                has_tokens,
            ],
        }
    }

    #[must_use]
    pub fn is_done(&self, step: OnboardingStep) -> bool {
        self.done[step as usize]
    }

    /// First step still pending, if any.
    #[must_use]
    pub fn next_step(&self) -> Option<OnboardingStep> {
        OnboardingStep::ALL
            .into_iter()
            .find(|step| !self.is_done(*step))
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.next_step().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Address};
    use rust_decimal_macros::dec;

    const ACCOUNT: Address = address!("00000000000000000000000000000000000000aa");

    #[test]
    fn nothing_done_without_wallet() {
        let progress =
            OnboardingProgress::derive(WalletAvailability::Missing, &Session::empty(), false, None);
        assert_eq!(progress.next_step(), Some(OnboardingStep::InstallWallet));
    }

    #[test]
    fn connected_on_wrong_network_stops_at_switch() {
        let session = Session::connected(ACCOUNT, 1);
        let progress =
            OnboardingProgress::derive(WalletAvailability::Available, &session, false, None);
        assert!(progress.is_done(OnboardingStep::ConnectAccount));
        assert_eq!(progress.next_step(), Some(OnboardingStep::SwitchNetwork));
    }

    #[test]
    fn funded_account_with_tokens_is_complete() {
        let session = Session::connected(ACCOUNT, 4);
        let mut snapshot = BalanceSnapshot::zero(ACCOUNT, 4);
        snapshot.native_balance = dec!(0.1);
        snapshot.token_balance = dec!(1000);

        let progress = OnboardingProgress::derive(
            WalletAvailability::Available,
            &session,
            true,
            Some(&snapshot),
        );
        assert!(progress.is_complete());
    }

    #[test]
    fn one_token_does_not_complete_claim() {
        let session = Session::connected(ACCOUNT, 4);
        let mut snapshot = BalanceSnapshot::zero(ACCOUNT, 4);
        snapshot.native_balance = dec!(0.1);
        snapshot.token_balance = dec!(1);

        let progress = OnboardingProgress::derive(
            WalletAvailability::Available,
            &session,
            true,
            Some(&snapshot),
        );
        assert_eq!(progress.next_step(), Some(OnboardingStep::ClaimTokens));
    }

    #[test]
    fn stale_snapshot_is_ignored() {
        let session = Session::connected(ACCOUNT, 4);
        let mut snapshot = BalanceSnapshot::zero(ACCOUNT, 1);
        snapshot.native_balance = dec!(5);

        let progress = OnboardingProgress::derive(
            WalletAvailability::Available,
            &session,
            true,
            Some(&snapshot),
        );
        assert_eq!(progress.next_step(), Some(OnboardingStep::FundGas));
    }
}
