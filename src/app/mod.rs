//! Application layer - the claim flow components, configuration, and the
//! controller facade that holds shared state.

mod balance;
mod config;
mod controller;
mod detector;
mod mint;
mod session;

pub use balance::BalanceReader;
pub use config::{
    ClaimSettings, Config, LoggingConfig, MintConfig, NetworkConfig, TokenConfig, WalletConfig,
};
pub use controller::ClaimController;
pub use detector::WalletDetector;
pub use mint::MintOrchestrator;
pub use session::SessionController;
