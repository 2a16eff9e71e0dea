//! Claim controller facade.
//!
//! Wires the detector, session controller, balance reader and mint
//! orchestrator together and keeps the state a presentation layer renders:
//! wallet availability, session, latest balances and the current mint.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use super::balance::BalanceReader;
use super::config::ClaimSettings;
use super::detector::{require_provider, WalletDetector};
use super::mint::MintOrchestrator;
use super::session::SessionController;
use crate::domain::{
    BalanceSnapshot, MintOperation, MintState, OnboardingProgress, Session, TokenInfo,
    WalletAvailability,
};
use crate::error::{ClaimError, Result};
use crate::port::{ChainReader, RewardToken, WalletEnvironment};

/// Entry point for the onboarding and claim flow.
///
/// Calls that depend on the network (balances, mint) read the session
/// produced by the last completed connect or switch.
pub struct ClaimController {
    environment: Arc<dyn WalletEnvironment>,
    detector: WalletDetector,
    sessions: SessionController,
    balances: Arc<BalanceReader>,
    minter: MintOrchestrator,
    availability: RwLock<WalletAvailability>,
    latest: RwLock<Option<BalanceSnapshot>>,
}

impl ClaimController {
    /// Build a controller and run the initial wallet detection.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured mint amount cannot be expressed in
    /// token base units.
    #[allow(clippy::result_large_err)]
    pub fn new(
        settings: ClaimSettings,
        environment: Arc<dyn WalletEnvironment>,
        chain: Arc<dyn ChainReader>,
        token: Arc<dyn RewardToken>,
    ) -> Result<Self> {
        let balances = Arc::new(BalanceReader::new(
            chain,
            token.clone(),
            settings.network.clone(),
        ));
        let minter = MintOrchestrator::new(
            environment.clone(),
            token,
            balances.clone(),
            settings.network.clone(),
            settings.mint_amount,
        )?
        .with_confirmation_timeout(settings.confirmation_timeout);

        let detector = WalletDetector::new(environment.clone());
        let availability = detector.detect();

        Ok(Self {
            sessions: SessionController::new(environment.clone(), settings.network),
            environment,
            detector,
            balances,
            minter,
            availability: RwLock::new(availability),
            latest: RwLock::new(None),
        })
    }

    /// Re-check the environment for a wallet and remember the result.
    pub fn detect(&self) -> WalletAvailability {
        let availability = self.detector.detect();
        *self.availability.write() = availability;
        availability
    }

    /// Result of the last detection.
    pub fn availability(&self) -> WalletAvailability {
        *self.availability.read()
    }

    pub fn session(&self) -> Session {
        self.sessions.session()
    }

    /// Whether the session is on the target network.
    pub fn is_on_target(&self) -> bool {
        self.sessions
            .target()
            .is_target(self.session().network_id())
    }

    /// Connect the wallet account, then refresh balances.
    ///
    /// # Errors
    ///
    /// See [`SessionController::connect_account`].
    pub async fn connect_account(&self) -> std::result::Result<Session, ClaimError> {
        let session = self.sessions.connect_account().await?;
        self.refresh_balances().await;
        Ok(session)
    }

    /// Switch the wallet to the target network, then refresh balances.
    ///
    /// # Errors
    ///
    /// See [`SessionController::switch_network`].
    pub async fn switch_network(&self) -> std::result::Result<Session, ClaimError> {
        let session = self.sessions.switch_to_target().await?;
        self.refresh_balances().await;
        Ok(session)
    }

    /// Pick up a network change made on the wallet side, then refresh
    /// balances. Snapshots from the previous network stop being reported.
    ///
    /// # Errors
    ///
    /// See [`SessionController::refresh_network`].
    pub async fn refresh_network(&self) -> std::result::Result<Session, ClaimError> {
        let session = self.sessions.refresh_network().await?;
        self.refresh_balances().await;
        Ok(session)
    }

    /// Read balances for the current session and keep the snapshot.
    ///
    /// Returns `None` without reading while no account or network is known.
    pub async fn refresh_balances(&self) -> Option<BalanceSnapshot> {
        let session = self.session();
        let (account, network_id) = session.account().zip(session.network_id())?;

        let snapshot = self.balances.read_balances(account, network_id).await;
        self.store_snapshot(&snapshot);
        Some(snapshot)
    }

    /// Latest snapshot, if it still matches the current session.
    pub fn latest_balances(&self) -> Option<BalanceSnapshot> {
        let session = self.session();
        self.latest
            .read()
            .as_ref()
            .filter(|snapshot| snapshot.is_valid_for(&session))
            .cloned()
    }

    /// Mint tokens to the connected account.
    ///
    /// On confirmation the follow-up balance read becomes the latest
    /// snapshot.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::NotConnected`] without an account
    /// - [`ClaimError::NotOnTargetNetwork`] off the target network
    /// - the pre-check errors of [`MintOrchestrator::request_mint`]
    pub async fn request_mint(&self) -> std::result::Result<MintOperation, ClaimError> {
        let session = self.session();
        let account = session.account().ok_or(ClaimError::NotConnected)?;
        let network_id = session
            .network_id()
            .ok_or(ClaimError::NotOnTargetNetwork {
                expected: self.sessions.target().chain_id,
                actual: None,
            })?;

        let op = self.minter.request_mint(account, network_id).await?;
        if let Some(snapshot) = op.balance_after() {
            self.store_snapshot(snapshot);
        }
        Ok(op)
    }

    /// The current (or last) mint operation.
    pub fn mint_operation(&self) -> Option<MintOperation> {
        self.minter.current()
    }

    /// Label for the mint button.
    pub fn mint_label(&self) -> &'static str {
        self.mint_operation()
            .map_or(MintState::Idle.label(), |op| op.state().label())
    }

    /// Ask the wallet to track the reward token.
    ///
    /// Returns whether the wallet reports the token as added.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::ProviderUnavailable`] if no wallet is present
    /// - [`ClaimError::UserRejected`] if the user declines
    pub async fn register_token(&self) -> std::result::Result<bool, ClaimError> {
        let provider = require_provider(self.environment.as_ref())?;
        let token = self.token();

        let added = provider
            .watch_asset(&token.asset_params())
            .await
            .map_err(|e| {
                warn!(token = %token.symbol, code = e.code, error = %e.message, "Token registration failed");
                ClaimError::from(e)
            })?;

        if added {
            info!(token = %token.symbol, address = %token.address, "Token added to wallet");
        } else {
            info!(token = %token.symbol, "Wallet declined to track token");
        }
        Ok(added)
    }

    pub fn token(&self) -> &TokenInfo {
        self.minter.token()
    }

    /// Onboarding checklist derived from the current state.
    pub fn onboarding(&self) -> OnboardingProgress {
        let session = self.session();
        OnboardingProgress::derive(
            self.availability(),
            &session,
            self.is_on_target(),
            self.latest_balances().as_ref(),
        )
    }

    /// Keep `snapshot` unless the session has moved on since it was taken.
    fn store_snapshot(&self, snapshot: &BalanceSnapshot) {
        if snapshot.is_valid_for(&self.session()) {
            *self.latest.write() = Some(snapshot.clone());
        }
    }
}
