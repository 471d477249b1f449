//! Domain data extracted from, or destined for, the ledger.

use alloy::{
    primitives::{Address, Bytes, TxHash, U256},
    rpc::types::Log,
};

/// Confirmed outcome of a transaction, as far as the relayer cares: whether
/// execution succeeded and which logs it emitted.
#[derive(Debug, Clone)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub succeeded: bool,
    pub logs: Vec<Log>,
}

impl TxOutcome {
    pub fn from_receipt(receipt: alloy::rpc::types::TransactionReceipt) -> Self {
        Self {
            tx_hash: receipt.transaction_hash,
            succeeded: receipt.status(),
            logs: receipt.inner.logs().to_vec(),
        }
    }
}

/// A verified token transfer into a forwarding address. Read once from a
/// transaction receipt, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositEvent {
    pub from: Address,
    pub to: Address,
    pub amount: U256,
}

/// A user-signed withdrawal authorization.
///
/// `amount == 0` is the "withdraw full available balance" sentinel. The nonce
/// is a caller-supplied hint; the ledger is the source of truth and rejects
/// replays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalAuthorization {
    pub user: Address,
    pub amount: U256,
    pub nonce: U256,
    pub signature: Bytes,
}
