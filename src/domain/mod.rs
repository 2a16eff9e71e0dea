//! Domain types for the claim flow.
//!
//! Everything here is plain data plus the rules that keep it consistent:
//! the session invariant, base-unit conversion, snapshot validity and the
//! mint state machine. No I/O.

pub mod amount;
pub mod balance;
pub mod error;
pub mod mint;
pub mod network;
pub mod onboarding;
pub mod session;
pub mod token;

pub use amount::{to_base_units, to_whole_units, TOKEN_DECIMALS};
pub use balance::{BalanceKind, BalanceReadDegraded, BalanceSnapshot};
pub use error::DomainError;
pub use mint::{MintFailure, MintOperation, MintState};
pub use network::{ChainParams, NativeCurrency, TargetNetwork};
pub use onboarding::{OnboardingProgress, OnboardingStep};
pub use session::{Session, WalletAvailability};
pub use token::{AssetOptions, AssetParams, TokenInfo};
