//! Domain logic: address derivation, deposit verification, forwarder
//! provisioning, withdrawal relay and the orchestrator tying them together.
//!
//! Everything here is stateless: all durable facts (deployed-or-not,
//! balances, nonces) live on the ledger, reached through the injected
//! [`crate::services::LedgerClient`].

use alloy::primitives::{Address, B256};

mod deposit;
pub use deposit::*;
mod deriver;
pub use deriver::*;
mod forwarder;
pub use forwarder::*;
mod relayer;
pub use relayer::*;
mod withdrawal;
pub use withdrawal::*;

/// Addresses and derivation inputs of the deployed contract suite.
///
/// `forwarder_init_code_hash` must match the factory's creation bytecode
/// hash bit-for-bit; see [`derive_forwarder_address`].
#[derive(Debug, Clone, Copy)]
pub struct ContractSet {
    pub deposit_token: Address,
    pub forwarder_factory: Address,
    pub forwarder_init_code_hash: B256,
    pub salt: B256,
}
