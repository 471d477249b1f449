use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the ledger RPC layer.
///
/// `Timeout`, `RateLimited` and `BadGateway` are the transient class: safe to
/// retry for read-only calls. Submitted transactions are never resubmitted on
/// these errors without first checking whether they already landed.
#[derive(Error, Debug, Serialize, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Network configuration error: {0}")]
    NetworkConfiguration(String),
    #[error("RPC request timed out")]
    Timeout,
    #[error("RPC endpoint rate limited the request")]
    RateLimited,
    #[error("RPC endpoint unavailable (bad gateway)")]
    BadGateway,
    #[error("Execution reverted: {0}")]
    Revert(String),
    #[error("RPC request error: {0}")]
    RequestError(String),
    #[error("Provider error: {0}")]
    Other(String),
}

impl ProviderError {
    /// Whether the error belongs to the transient class that read-only calls
    /// may retry.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ProviderError::Timeout | ProviderError::RateLimited | ProviderError::BadGateway
        )
    }
}
