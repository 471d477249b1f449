//! Deposit verification.
//!
//! A deposit claim is just a transaction hash. Before anything is credited,
//! the transaction must be confirmed, must carry a transfer of the deposit
//! token, and the transfer destination must be the depositor's own
//! deterministic forwarding address. A transaction that merely mentions a
//! user is never credited to that user's slot.

use std::sync::Arc;

use alloy::{primitives::TxHash, sol_types::SolEvent};
use log::debug;

use super::{derive_forwarder_address, ContractSet};
use crate::{
    models::{DepositError, DepositEvent},
    services::{abi::Transfer, LedgerClient},
};

pub struct DepositVerifier<L> {
    ledger: Arc<L>,
    contracts: ContractSet,
}

impl<L: LedgerClient> DepositVerifier<L> {
    pub fn new(ledger: Arc<L>, contracts: ContractSet) -> Self {
        Self { ledger, contracts }
    }

    /// Verify that `tx_hash` pays the deposit token into the correct
    /// forwarding address for some depositor.
    pub async fn verify(&self, tx_hash: TxHash) -> Result<DepositEvent, DepositError> {
        let outcome = self
            .ledger
            .get_transaction_receipt(tx_hash)
            .await?
            .ok_or(DepositError::TransactionNotFound(tx_hash))?;

        if !outcome.succeeded {
            return Err(DepositError::TransactionFailed(tx_hash));
        }

        // First matching log wins; log order is the ledger's canonical order.
        let log = outcome
            .logs
            .iter()
            .find(|log| {
                log.address() == self.contracts.deposit_token
                    && log.topic0() == Some(&Transfer::SIGNATURE_HASH)
            })
            .ok_or(DepositError::NoTransferEvent(tx_hash))?;

        let transfer = log
            .log_decode::<Transfer>()
            .map_err(|_| DepositError::NoTransferEvent(tx_hash))?
            .inner
            .data;

        let expected = derive_forwarder_address(
            transfer.from,
            self.contracts.salt,
            self.contracts.forwarder_factory,
            self.contracts.forwarder_init_code_hash,
        );

        // Address equality on the parsed 20-byte values, so checksum casing
        // in the original transaction is irrelevant.
        if transfer.to != expected {
            return Err(DepositError::ForwarderMismatch {
                expected,
                actual: transfer.to,
            });
        }

        debug!(
            "verified deposit of {} base units from {} into forwarder {}",
            transfer.value, transfer.from, transfer.to
        );

        Ok(DepositEvent {
            from: transfer.from,
            to: transfer.to,
            amount: transfer.value,
        })
    }
}
