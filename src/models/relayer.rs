//! Request and response types for the relayer API.
//!
//! Amounts and nonces cross the transport boundary as decimal strings and are
//! parsed exactly once here; parse failures are rejected before any ledger
//! call is made.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::WithdrawalAuthorization;

/// Body of `POST /deposits`: a transaction the user claims pays into their
/// forwarding address.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    pub tx_hash: String,
}

impl DepositRequest {
    pub fn parse(&self) -> Result<TxHash, String> {
        self.tx_hash
            .parse::<TxHash>()
            .map_err(|_| format!("invalid transaction hash: {}", self.tx_hash))
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositResponse {
    /// Hash of the confirmed deposit-forward transaction.
    pub tx_hash: String,
}

/// Body of `POST /forwarders`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderRequest {
    pub owner: String,
}

impl ForwarderRequest {
    pub fn parse(&self) -> Result<Address, String> {
        self.owner
            .parse::<Address>()
            .map_err(|_| format!("invalid owner address: {}", self.owner))
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderResponse {
    pub forwarder_address: String,
    /// Whether this call submitted a deployment, as opposed to finding the
    /// forwarder already on-chain.
    pub deployed: bool,
}

/// Body of `POST /withdrawals`: an off-chain signed withdrawal authorization.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    pub user: String,
    /// Decimal amount in token base units. Absent or "0" withdraws the full
    /// available balance.
    #[serde(default)]
    pub amount: Option<String>,
    /// Decimal nonce the signature was produced over.
    pub nonce: String,
    /// Hex-encoded signature bytes.
    pub signature: String,
}

impl WithdrawalRequest {
    pub fn parse(&self) -> Result<WithdrawalAuthorization, String> {
        let user = self
            .user
            .parse::<Address>()
            .map_err(|_| format!("invalid user address: {}", self.user))?;

        let amount = match self.amount.as_deref() {
            None | Some("") => U256::ZERO,
            Some(raw) => raw
                .parse::<U256>()
                .map_err(|_| format!("invalid amount: {raw}"))?,
        };

        let nonce = self
            .nonce
            .parse::<U256>()
            .map_err(|_| format!("invalid nonce: {}", self.nonce))?;

        let signature = self
            .signature
            .parse::<Bytes>()
            .map_err(|_| "invalid signature encoding".to_string())?;
        if signature.is_empty() {
            return Err("signature must not be empty".to_string());
        }

        Ok(WithdrawalAuthorization {
            user,
            amount,
            nonce,
            signature,
        })
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    /// Hash of the confirmed withdrawal transaction.
    pub tx_hash: String,
    /// The owner's nonce after the withdrawal, read back from the ledger.
    pub next_nonce: String,
}
