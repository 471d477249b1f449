//! Protocol and service constants.

use alloy::primitives::{keccak256, B256};

/// Pre-image of the process-wide CREATE2 salt. Fixed at deployment time;
/// changing it invalidates every previously derived forwarding address.
pub const FORWARDER_SALT_PREIMAGE: &[u8] = b"depositForwarder";

/// Decimals of the deposit token, used for human-readable log output only.
pub const DEPOSIT_TOKEN_DECIMALS: u8 = 6;

/// Default timeout for individual RPC requests, in milliseconds.
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 30_000;

/// Default timeout when waiting for a submitted transaction to confirm.
pub const DEFAULT_CONFIRMATION_TIMEOUT_MS: u64 = 60_000;

/// Maximum retry attempts for read-only RPC calls.
pub const DEFAULT_RETRY_MAX_ATTEMPTS: u8 = 3;

/// Base delay for exponential backoff between retries, in milliseconds.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 200;

/// Cap on the backoff delay, in milliseconds.
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5_000;

/// Jitter applied to retry delays, as a fraction of the delay.
pub const RETRY_JITTER_PERCENT: f64 = 0.1;

/// The process-wide CREATE2 salt: `keccak256("depositForwarder")`.
pub fn forwarder_salt() -> B256 {
    keccak256(FORWARDER_SALT_PREIMAGE)
}
