//! Account connection and network negotiation.
//!
//! Switching networks is a two-step negotiation: wallets refuse to switch
//! to a chain they do not know, and will not create one silently. On the
//! "unrecognized chain" code the target is registered and the switch is
//! retried exactly once.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use super::detector::require_provider;
use crate::domain::{Session, TargetNetwork};
use crate::error::ClaimError;
use crate::port::{WalletEnvironment, WalletProvider};

/// Owns the session and issues connect/switch requests to the wallet.
pub struct SessionController {
    environment: Arc<dyn WalletEnvironment>,
    network: TargetNetwork,
    session: RwLock<Session>,
}

impl SessionController {
    pub fn new(environment: Arc<dyn WalletEnvironment>, network: TargetNetwork) -> Self {
        Self {
            environment,
            network,
            session: RwLock::new(Session::empty()),
        }
    }

    /// Current session.
    pub fn session(&self) -> Session {
        *self.session.read()
    }

    /// The network claims happen on.
    pub fn target(&self) -> &TargetNetwork {
        &self.network
    }

    /// Request account access and read the wallet's active network.
    ///
    /// Re-running replaces the session with a fresh one.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::ProviderUnavailable`] if no wallet is present
    /// - [`ClaimError::UserRejected`] if the user declines the prompt
    /// - [`ClaimError::NoAccounts`] if access is granted but no account returned
    pub async fn connect_account(&self) -> Result<Session, ClaimError> {
        let provider = require_provider(self.environment.as_ref())?;

        let accounts = provider.request_accounts().await.map_err(|e| {
            warn!(code = e.code, error = %e.message, "Account request failed");
            ClaimError::from(e)
        })?;
        let account = accounts.first().copied().ok_or(ClaimError::NoAccounts)?;
        let chain_id = provider.chain_id().await?;

        let session = Session::connected(account, chain_id);
        *self.session.write() = session;

        info!(
            account = %account,
            chain_id,
            wallet = provider.name(),
            "Wallet connected"
        );
        Ok(session)
    }

    /// Switch to the configured target network.
    ///
    /// # Errors
    ///
    /// See [`SessionController::switch_network`].
    pub async fn switch_to_target(&self) -> Result<Session, ClaimError> {
        self.switch_network(self.network.chain_id).await
    }

    /// Ask the wallet to change its active network to `target_chain_id`.
    ///
    /// Only the configured target network can be registered when the wallet
    /// does not know the chain. The session is left untouched on failure.
    ///
    /// # Errors
    ///
    /// - [`ClaimError::ProviderUnavailable`] if no wallet is present
    /// - [`ClaimError::NetworkAddFailed`] if registration fails or does not
    ///   take effect
    /// - [`ClaimError::UserRejected`] if the user declines the switch
    pub async fn switch_network(&self, target_chain_id: u64) -> Result<Session, ClaimError> {
        let provider = require_provider(self.environment.as_ref())?;

        match provider.switch_chain(target_chain_id).await {
            Ok(()) => {}
            Err(e) if e.is_unrecognized_chain() => {
                info!(chain_id = target_chain_id, "Chain unknown to wallet, registering");
                self.register_chain(provider.as_ref(), target_chain_id).await?;
                provider.switch_chain(target_chain_id).await.map_err(|e| {
                    if e.is_unrecognized_chain() {
                        ClaimError::NetworkAddFailed {
                            chain_id: target_chain_id,
                            reason: "wallet still does not recognize the chain".into(),
                        }
                    } else {
                        ClaimError::from(e)
                    }
                })?;
            }
            Err(e) => {
                warn!(
                    chain_id = target_chain_id,
                    code = e.code,
                    error = %e.message,
                    "Network switch failed"
                );
                return Err(e.into());
            }
        }

        self.refresh_network_with(provider.as_ref()).await
    }

    /// Re-read the wallet's active network into the session.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::ProviderUnavailable`] if no wallet is present,
    /// or the provider error if the read fails.
    pub async fn refresh_network(&self) -> Result<Session, ClaimError> {
        let provider = require_provider(self.environment.as_ref())?;
        self.refresh_network_with(provider.as_ref()).await
    }

    async fn refresh_network_with(
        &self,
        provider: &dyn WalletProvider,
    ) -> Result<Session, ClaimError> {
        let chain_id = provider.chain_id().await?;

        let session = {
            let mut session = self.session.write();
            *session = session.with_network(chain_id);
            *session
        };

        info!(
            chain_id,
            on_target = self.network.is_target(session.network_id()),
            "Active network updated"
        );
        Ok(session)
    }

    async fn register_chain(
        &self,
        provider: &dyn WalletProvider,
        chain_id: u64,
    ) -> Result<(), ClaimError> {
        if chain_id != self.network.chain_id {
            return Err(ClaimError::NetworkAddFailed {
                chain_id,
                reason: "no registration parameters for this chain".into(),
            });
        }

        provider
            .add_chain(&self.network.chain_params())
            .await
            .map_err(|e| {
                warn!(chain_id, code = e.code, error = %e.message, "Network registration failed");
                ClaimError::NetworkAddFailed {
                    chain_id,
                    reason: e.message,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::ProviderError;
    use crate::testkit::config::{account, rinkeby};
    use crate::testkit::wallet::{ScriptedWallet, StaticEnvironment};

    fn controller(wallet: Arc<ScriptedWallet>) -> SessionController {
        SessionController::new(Arc::new(StaticEnvironment::with(wallet)), rinkeby())
    }

    #[tokio::test]
    async fn connect_populates_account_and_network() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1));
        let sessions = controller(wallet);

        let session = sessions.connect_account().await.unwrap();
        assert_eq!(session.account(), Some(account()));
        assert_eq!(session.network_id(), Some(1));
        assert_eq!(sessions.session(), session);
    }

    #[tokio::test]
    async fn connect_without_provider_is_distinguishable() {
        let sessions = SessionController::new(Arc::new(StaticEnvironment::empty()), rinkeby());
        assert_eq!(
            sessions.connect_account().await,
            Err(ClaimError::ProviderUnavailable)
        );
        assert_eq!(sessions.session(), Session::empty());
    }

    #[tokio::test]
    async fn declined_connect_is_user_rejected() {
        let wallet = Arc::new(ScriptedWallet::new());
        wallet.push_account_result(Err(ProviderError::user_rejected()));
        let sessions = controller(wallet);

        assert_eq!(sessions.connect_account().await, Err(ClaimError::UserRejected));
        assert!(!sessions.session().is_connected());
    }

    #[tokio::test]
    async fn empty_account_list_is_reported() {
        let wallet = Arc::new(ScriptedWallet::new());
        wallet.push_account_result(Ok(vec![]));
        let sessions = controller(wallet);

        assert_eq!(sessions.connect_account().await, Err(ClaimError::NoAccounts));
    }

    #[tokio::test]
    async fn switch_to_known_chain_updates_network() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1).knowing(&[1, 4]));
        let sessions = controller(wallet.clone());
        sessions.connect_account().await.unwrap();

        let session = sessions.switch_to_target().await.unwrap();
        assert_eq!(session.network_id(), Some(4));
        assert_eq!(wallet.calls().switch_chain, 1);
        assert_eq!(wallet.calls().add_chain, 0);
    }

    #[tokio::test]
    async fn unknown_chain_is_registered_then_retried_once() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1).knowing(&[1]));
        let sessions = controller(wallet.clone());
        sessions.connect_account().await.unwrap();

        let session = sessions.switch_to_target().await.unwrap();
        assert_eq!(session.network_id(), Some(4));
        assert_eq!(wallet.calls().switch_chain, 2);
        assert_eq!(wallet.calls().add_chain, 1);
        assert_eq!(wallet.added_chains()[0].chain_id, "0x4");
    }

    #[tokio::test]
    async fn failed_registration_leaves_session_unchanged() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1).knowing(&[1]));
        wallet.push_add_chain_result(Err(ProviderError::internal("add failed")));
        let sessions = controller(wallet.clone());
        let before = sessions.connect_account().await.unwrap();

        let err = sessions.switch_to_target().await.unwrap_err();
        assert!(matches!(err, ClaimError::NetworkAddFailed { chain_id: 4, .. }));
        assert_eq!(sessions.session(), before);
        assert_eq!(wallet.calls().switch_chain, 1);
        assert_eq!(wallet.calls().add_chain, 1);
    }

    #[tokio::test]
    async fn registration_that_does_not_stick_fails_after_one_retry() {
        let wallet = Arc::new(
            ScriptedWallet::new()
                .on_chain(1)
                .knowing(&[1])
                .ignoring_added_chains(),
        );
        let sessions = controller(wallet.clone());
        sessions.connect_account().await.unwrap();

        let err = sessions.switch_to_target().await.unwrap_err();
        assert!(matches!(err, ClaimError::NetworkAddFailed { .. }));
        assert_eq!(wallet.calls().switch_chain, 2);
        assert_eq!(wallet.calls().add_chain, 1);
        assert_eq!(sessions.session().network_id(), Some(1));
    }

    #[tokio::test]
    async fn switching_twice_to_current_network_is_idempotent() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(4));
        let sessions = controller(wallet);
        sessions.connect_account().await.unwrap();

        let first = sessions.switch_to_target().await.unwrap();
        let second = sessions.switch_to_target().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(second.network_id(), Some(4));
    }

    #[tokio::test]
    async fn rejected_switch_is_user_rejected() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1));
        wallet.push_switch_result(Err(ProviderError::user_rejected()));
        let sessions = controller(wallet);
        sessions.connect_account().await.unwrap();

        assert_eq!(sessions.switch_to_target().await, Err(ClaimError::UserRejected));
        assert_eq!(sessions.session().network_id(), Some(1));
    }

    #[tokio::test]
    async fn switch_without_account_never_records_network() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1));
        let sessions = controller(wallet.clone());

        let session = sessions.switch_to_target().await.unwrap();
        assert!(session.account().is_none());
        assert!(session.network_id().is_none());
        assert_eq!(wallet.active_chain(), 4);
    }

    #[tokio::test]
    async fn switch_without_provider_is_unavailable() {
        let sessions = SessionController::new(Arc::new(StaticEnvironment::empty()), rinkeby());
        assert_eq!(
            sessions.switch_to_target().await,
            Err(ClaimError::ProviderUnavailable)
        );
    }

    #[tokio::test]
    async fn unregistrable_chain_fails_without_add_request() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1).knowing(&[1]));
        let sessions = controller(wallet.clone());
        sessions.connect_account().await.unwrap();

        let err = sessions.switch_network(137).await.unwrap_err();
        assert!(matches!(err, ClaimError::NetworkAddFailed { chain_id: 137, .. }));
        assert_eq!(wallet.calls().add_chain, 0);
    }

    #[tokio::test]
    async fn refresh_network_picks_up_wallet_side_changes() {
        let wallet = Arc::new(ScriptedWallet::new().on_chain(1));
        let sessions = controller(wallet.clone());
        sessions.connect_account().await.unwrap();

        wallet.set_active_chain(4);
        let session = sessions.refresh_network().await.unwrap();
        assert_eq!(session.network_id(), Some(4));
    }
}
