//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators of the claim flow:
//! the wallet provider, the read-only chain connection and the reward-token
//! contract.

pub mod chain;
pub mod token;
pub mod wallet;
