//! Withdrawal relay.
//!
//! The relayer never verifies the signature or nonce itself; both are
//! authoritative on the ledger's execution of the withdrawal entry point. Its
//! job is to submit the authorization from its own funded account and to
//! surface the ledger's verdict faithfully. A rejected withdrawal is never
//! retried: resubmitting the same nonce/signature fails deterministically.

use std::sync::Arc;

use alloy::primitives::TxHash;
use log::info;

use crate::{
    models::{ProviderError, WithdrawalAuthorization, WithdrawalError},
    services::LedgerClient,
};

pub struct WithdrawalRelayer<L> {
    ledger: Arc<L>,
}

impl<L: LedgerClient> WithdrawalRelayer<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Submit a user-signed withdrawal authorization. `amount == 0` is the
    /// "withdraw full available balance" sentinel and is forwarded verbatim.
    pub async fn relay(&self, auth: &WithdrawalAuthorization) -> Result<TxHash, WithdrawalError> {
        info!(
            "relaying withdrawal for {} (amount {}, nonce {})",
            auth.user, auth.amount, auth.nonce
        );

        let outcome = match self
            .ledger
            .withdraw_gasless(auth.user, auth.amount, auth.nonce, auth.signature.clone())
            .await
        {
            Ok(outcome) => outcome,
            // The ledger refused execution; pass its reason through verbatim.
            Err(ProviderError::Revert(reason)) => {
                return Err(WithdrawalError::WithdrawalRejected(reason))
            }
            Err(err) => return Err(err.into()),
        };

        if !outcome.succeeded {
            return Err(WithdrawalError::WithdrawalRejected(format!(
                "transaction {} reverted on-chain",
                outcome.tx_hash
            )));
        }

        Ok(outcome.tx_hash)
    }
}
