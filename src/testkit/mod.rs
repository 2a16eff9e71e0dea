//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`wallet`] - Mock [`WalletProvider`](crate::port::WalletProvider) and
//!   [`WalletEnvironment`](crate::port::WalletEnvironment):
//!   `ScriptedWallet`, `StaticEnvironment`.
//! - [`chain`] - In-memory `Ledger` with the `StaticChain` and `LedgerToken`
//!   read ports on top.
//! - [`config`] - Canonical account, network, token and settings.

pub mod chain;
pub mod config;
pub mod wallet;
