//! Error taxonomy for the three relayer operations.
//!
//! Deposit verification failures are hard rejections: a transaction that is
//! present but not attributable to the claimed owner is never credited.

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use thiserror::Error;

use super::provider::ProviderError;

/// Failures while provisioning a forwarding contract.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ProvisionError {
    /// The locally derived address disagrees with the factory's canonical
    /// formula. Deploying would create a forwarder the relayer refuses to
    /// credit, so this aborts before any transaction is sent.
    #[error("derived forwarder address {derived} does not match factory address {canonical}")]
    DerivationMismatch {
        canonical: Address,
        derived: Address,
    },
    /// Neither a pre-existing nor a new deployment could be confirmed.
    #[error("forwarder deployment could not be confirmed: {0}")]
    DeploymentFailed(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures while verifying and processing a deposit.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum DepositError {
    #[error("transaction {0} not found")]
    TransactionNotFound(TxHash),
    #[error("transaction {0} failed on-chain")]
    TransactionFailed(TxHash),
    #[error("no deposit token transfer event found in transaction {0}")]
    NoTransferEvent(TxHash),
    /// The transfer destination is not the depositor's own deterministic
    /// forwarding address. This is the anti-spoofing check.
    #[error("transfer destination {actual} is not the depositor's forwarder {expected}")]
    ForwarderMismatch { expected: Address, actual: Address },
    /// The deposit-forward call itself reverted after a verified deposit.
    #[error("forwarding deposit was rejected by the ledger: {0}")]
    ForwardRejected(String),
    #[error(transparent)]
    Provision(#[from] ProvisionError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Failures while relaying a withdrawal authorization.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum WithdrawalError {
    /// The ledger's signature/nonce/balance check failed. The reason string
    /// is passed through verbatim where the ledger provides one; a stale
    /// nonce or bad signature surfaces here since the relayer cannot detect
    /// those locally.
    #[error("withdrawal rejected by the ledger: {0}")]
    WithdrawalRejected(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
