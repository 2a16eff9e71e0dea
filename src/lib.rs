//! Coinclaim - wallet onboarding and reward-token claiming on an EVM chain.
//!
//! Walks a user from "no wallet" to "holding reward tokens": detect an
//! injected wallet, connect an account, move the wallet onto the target
//! network (registering it if the wallet does not know it), read native and
//! token balances, and mint tokens to the connected account while tracking
//! the transaction to a terminal state.
//!
//! # Architecture
//!
//! Hexagonal: the claim flow talks to the outside world only through ports.
//!
//! - **`domain`** - Session, balance snapshot, mint state machine, unit
//!   conversion, onboarding checklist. No I/O.
//! - **`port`** - `WalletProvider`, `WalletEnvironment`, `ChainReader`,
//!   `RewardToken`.
//! - **`app`** - Detector, session controller, balance reader, mint
//!   orchestrator, and the `ClaimController` facade; configuration.
//! - **`adapter`** - JSON-RPC implementations (requires `rpc` feature).
//!
//! # Features
//!
//! - `rpc` (default) - JSON-RPC adapters and a headless local-key wallet
//! - `testkit` - Scripted wallet and in-memory chain for integration tests
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> coinclaim::error::Result<()> {
//! use coinclaim::app::Config;
//!
//! Config::load_env_file();
//! let config = Config::load("config.toml")?;
//! config.init_logging();
//!
//! let controller = coinclaim::adapter::outbound::rpc::connect(&config).await?;
//! controller.connect_account().await?;
//! controller.switch_network().await?;
//! let op = controller.request_mint().await?;
//! println!("{}", op.state().label());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(feature = "rpc")]
pub mod adapter;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
