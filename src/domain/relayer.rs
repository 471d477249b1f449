//! Orchestrator composing verification, provisioning and withdrawal relay
//! into the three externally visible operations. Stateless: nothing is
//! retained between calls, so a crash mid-operation loses nothing the ledger
//! does not already hold.

use std::sync::Arc;

use alloy::primitives::{
    utils::format_units, Address, TxHash, U256,
};
use log::info;

use super::{ContractSet, DepositVerifier, ForwarderProvisioner, WithdrawalRelayer};
use crate::{
    constants::DEPOSIT_TOKEN_DECIMALS,
    models::{DepositError, ProviderError, ProvisionError, WithdrawalAuthorization, WithdrawalError},
    services::LedgerClient,
};

pub struct Relayer<L> {
    ledger: Arc<L>,
    verifier: DepositVerifier<L>,
    provisioner: ForwarderProvisioner<L>,
    withdrawals: WithdrawalRelayer<L>,
}

impl<L: LedgerClient> Relayer<L> {
    /// All collaborators are injected here; there is no ambient global state.
    pub fn new(ledger: Arc<L>, contracts: ContractSet) -> Self {
        Self {
            verifier: DepositVerifier::new(ledger.clone(), contracts),
            provisioner: ForwarderProvisioner::new(ledger.clone(), contracts),
            withdrawals: WithdrawalRelayer::new(ledger.clone()),
            ledger,
        }
    }

    /// Verify a claimed deposit transaction, provision the depositor's
    /// forwarder if needed and push the funds into the custodial wallet.
    /// Returns the hash of the confirmed forward transaction.
    pub async fn process_deposit(&self, tx_hash: TxHash) -> Result<TxHash, DepositError> {
        let event = self.verifier.verify(tx_hash).await?;
        let (forwarder, _) = self.provisioner.ensure_deployed(event.from).await?;

        info!(
            "processing deposit for {}: {} tokens",
            event.from,
            display_amount(event.amount)
        );

        let outcome = match self
            .ledger
            .forward_deposit(forwarder, event.amount, event.from)
            .await
        {
            Ok(outcome) => outcome,
            // The forward call reverted at submission; the ledger refused it.
            Err(ProviderError::Revert(reason)) => {
                return Err(DepositError::ForwardRejected(reason))
            }
            Err(err) => return Err(err.into()),
        };
        if !outcome.succeeded {
            return Err(DepositError::ForwardRejected(format!(
                "transaction {} reverted on-chain",
                outcome.tx_hash
            )));
        }

        info!("deposit processed: {}", outcome.tx_hash);
        Ok(outcome.tx_hash)
    }

    /// Ensure the forwarder for `owner` exists. Returns the address and
    /// whether this call deployed it.
    pub async fn create_forwarder(&self, owner: Address) -> Result<(Address, bool), ProvisionError> {
        self.provisioner.ensure_deployed(owner).await
    }

    /// Relay a signed withdrawal authorization, then read back the owner's
    /// advanced nonce. The follow-up read is informational; the ledger's
    /// atomic nonce check is what actually prevents replays.
    pub async fn process_withdrawal(
        &self,
        auth: &WithdrawalAuthorization,
    ) -> Result<(TxHash, U256), WithdrawalError> {
        let tx_hash = self.withdrawals.relay(auth).await?;
        let next_nonce = self.ledger.get_withdraw_nonce(auth.user).await?;

        info!(
            "withdrawal processed: {} (nonce for {} is now {})",
            tx_hash, auth.user, next_nonce
        );
        Ok((tx_hash, next_nonce))
    }
}

fn display_amount(amount: U256) -> String {
    format_units(amount, DEPOSIT_TOKEN_DECIMALS).unwrap_or_else(|_| amount.to_string())
}
