//! Wallet detection.

use std::sync::Arc;

use tracing::debug;

use crate::domain::WalletAvailability;
use crate::error::ClaimError;
use crate::port::{WalletEnvironment, WalletProvider};

/// Checks the environment for an injected wallet provider.
///
/// Stateless and safe to call repeatedly; absence is a normal result.
pub struct WalletDetector {
    environment: Arc<dyn WalletEnvironment>,
}

impl WalletDetector {
    pub fn new(environment: Arc<dyn WalletEnvironment>) -> Self {
        Self { environment }
    }

    /// Whether a wallet provider is present right now.
    pub fn detect(&self) -> WalletAvailability {
        let availability = WalletAvailability::from(self.environment.provider().is_some());
        debug!(available = availability.is_available(), "Wallet detection");
        availability
    }
}

/// Fetch the injected provider or fail with [`ClaimError::ProviderUnavailable`].
pub(crate) fn require_provider(
    environment: &dyn WalletEnvironment,
) -> Result<Arc<dyn WalletProvider>, ClaimError> {
    environment.provider().ok_or(ClaimError::ProviderUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::wallet::{ScriptedWallet, StaticEnvironment};

    #[test]
    fn missing_provider_is_not_an_error() {
        let detector = WalletDetector::new(Arc::new(StaticEnvironment::empty()));
        assert_eq!(detector.detect(), WalletAvailability::Missing);
    }

    #[test]
    fn present_provider_is_detected() {
        let env = StaticEnvironment::with(Arc::new(ScriptedWallet::new()));
        let detector = WalletDetector::new(Arc::new(env));
        assert_eq!(detector.detect(), WalletAvailability::Available);
    }

    #[test]
    fn detection_follows_environment_changes() {
        let env = Arc::new(StaticEnvironment::empty());
        let detector = WalletDetector::new(env.clone());
        assert!(!detector.detect().is_available());

        env.install(Arc::new(ScriptedWallet::new()));
        assert!(detector.detect().is_available());
        assert!(detector.detect().is_available());
    }

    #[test]
    fn require_provider_surfaces_unavailable() {
        let env = StaticEnvironment::empty();
        assert_eq!(
            require_provider(&env).err(),
            Some(ClaimError::ProviderUnavailable)
        );
    }
}
