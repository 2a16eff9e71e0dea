//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │     Claim controller     │
//!                 │  (detector, session,     │
//!                 │   balances, mint)        │
//!                 └────────────┬─────────────┘
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//!   ┌──────────────┐    ┌─────────────┐    ┌──────────────┐
//!   │WalletProvider│    │ ChainReader │    │ RewardToken  │
//!   └──────────────┘    └─────────────┘    └──────────────┘
//! ```

pub mod outbound;

pub use outbound::chain::ChainReader;
pub use outbound::token::{mint_calldata, IRewardToken, RewardToken};
pub use outbound::wallet::{
    ProviderError, ProviderResult, TransactionRequest, TxOutcome, WalletEnvironment,
    WalletProvider,
};
