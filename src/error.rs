use thiserror::Error;

use crate::domain::error::DomainError;
use crate::port::outbound::wallet::ProviderError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures surfaced by the claim flow to the presentation layer.
///
/// Each variant maps to a distinct, actionable message (install the wallet,
/// approve the prompt, switch network, wait for the pending mint).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("no wallet provider detected")]
    ProviderUnavailable,

    #[error("request rejected by the user")]
    UserRejected,

    #[error("wallet returned no accounts")]
    NoAccounts,

    #[error("no account connected")]
    NotConnected,

    #[error("failed to register network {chain_id}: {reason}")]
    NetworkAddFailed { chain_id: u64, reason: String },

    #[error("wrong network: expected chain {expected}, got {actual:?}")]
    NotOnTargetNetwork { expected: u64, actual: Option<u64> },

    #[error("a mint is already in progress")]
    OperationInProgress,

    #[error("wallet provider error {code}: {message}")]
    Provider { code: i64, message: String },
}

impl From<ProviderError> for ClaimError {
    fn from(err: ProviderError) -> Self {
        if err.is_user_rejection() {
            Self::UserRejected
        } else {
            Self::Provider {
                code: err.code,
                message: err.message,
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error("RPC error: {0}")]
    Rpc(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The claim error behind this error, if it is one.
    #[must_use]
    pub fn as_claim(&self) -> Option<&ClaimError> {
        match self {
            Self::Claim(err) => Some(err),
            _ => None,
        }
    }
}
