//! Ledger access layer.
//!
//! [`LedgerClient`] is the relayer's entire view of the distributed ledger;
//! the domain layer depends only on this trait so it can be exercised against
//! a mock. [`EvmLedgerClient`] is the production implementation backed by an
//! alloy HTTP provider.

use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use async_trait::async_trait;

use crate::models::{ProviderError, TxOutcome};

#[cfg(test)]
use mockall::automock;

pub mod abi;
mod evm;
pub use evm::*;
mod retry;
pub use retry::*;

/// Collaborator interface consumed from the ledger.
///
/// Read methods are side-effect free and may be retried on transient
/// failures. Submit methods (`deploy_forwarder`, `forward_deposit`,
/// `withdraw_gasless`) send exactly one transaction from the relayer's own
/// account and wait for its confirmation.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait LedgerClient: Send + Sync {
    /// Contract code at `address`. Empty means "not deployed".
    async fn get_code(&self, address: Address) -> Result<Bytes, ProviderError>;

    /// Execution outcome of a confirmed transaction, or `None` if the ledger
    /// does not know the hash.
    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TxOutcome>, ProviderError>;

    /// The factory's canonical forwarding address for `(owner, salt)`.
    async fn get_forwarder_address(
        &self,
        owner: Address,
        salt: B256,
    ) -> Result<Address, ProviderError>;

    /// Submit a forwarder deployment for `(owner, salt)` and wait for it.
    async fn deploy_forwarder(&self, owner: Address, salt: B256)
        -> Result<TxOutcome, ProviderError>;

    /// Invoke the forwarder's deposit-forward entry point and wait for it.
    async fn forward_deposit(
        &self,
        forwarder: Address,
        amount: U256,
        owner: Address,
    ) -> Result<TxOutcome, ProviderError>;

    /// Submit a gasless withdrawal on behalf of `user` and wait for it.
    async fn withdraw_gasless(
        &self,
        user: Address,
        amount: U256,
        nonce: U256,
        signature: Bytes,
    ) -> Result<TxOutcome, ProviderError>;

    /// The owner's current withdraw nonce held on the ledger.
    async fn get_withdraw_nonce(&self, owner: Address) -> Result<U256, ProviderError>;
}
