use std::sync::Arc;
use std::time::Duration;

use coinclaim::app::{ClaimController, ClaimSettings};
use coinclaim::testkit::chain::{Ledger, LedgerToken, StaticChain};
use coinclaim::testkit::config::{settings, settings_with_timeout, token_info};
use coinclaim::testkit::wallet::{ScriptedWallet, StaticEnvironment};

/// A controller wired to a scripted wallet and an in-memory chain, with
/// handles on every fake for assertions.
pub struct ClaimHarness {
    pub wallet: Arc<ScriptedWallet>,
    pub environment: Arc<StaticEnvironment>,
    pub ledger: Arc<Ledger>,
    pub chain: Arc<StaticChain>,
    pub token: Arc<LedgerToken>,
    pub controller: Arc<ClaimController>,
}

impl ClaimHarness {
    /// Controller with `wallet` installed.
    pub fn new(wallet: ScriptedWallet) -> Self {
        Self::build(Some(wallet), settings())
    }

    /// Controller whose environment has no wallet yet; `wallet` is ready to
    /// be installed.
    pub fn without_wallet() -> Self {
        Self::build(None, settings())
    }

    /// Controller with a bounded confirmation wait.
    pub fn with_timeout(wallet: ScriptedWallet, timeout: Duration) -> Self {
        Self::build(Some(wallet), settings_with_timeout(timeout))
    }

    fn build(wallet: Option<ScriptedWallet>, settings: ClaimSettings) -> Self {
        let ledger = Arc::new(Ledger::default());
        let installed = wallet.is_some();
        let wallet = Arc::new(wallet.unwrap_or_default().with_ledger(ledger.clone()));

        // The wallet always exists so tests can install it later.
        let environment = Arc::new(StaticEnvironment::empty());
        if installed {
            environment.install(wallet.clone());
        }
        let chain = Arc::new(StaticChain::new(ledger.clone()));
        let token = Arc::new(LedgerToken::new(ledger.clone(), token_info()));
        let controller = ClaimController::new(
            settings,
            environment.clone(),
            chain.clone(),
            token.clone(),
        )
        .expect("valid settings");

        Self {
            wallet,
            environment,
            ledger,
            chain,
            token,
            controller: Arc::new(controller),
        }
    }
}
