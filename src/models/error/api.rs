use actix_web::{HttpResponse, ResponseError};
use eyre::Report;
use thiserror::Error;

use crate::models::{ApiResponse, DepositError, ProvisionError, WithdrawalError};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Internal Server Error: {0}")]
    InternalEyreError(#[from] Report),

    #[error("Internal Server Error: {0}")]
    InternalError(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    UnprocessableEntity(String),
}

impl ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::InternalError(msg) => {
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(msg))
            }
            ApiError::NotFound(msg) => HttpResponse::NotFound().json(ApiResponse::<()>::error(msg)),
            ApiError::BadRequest(msg) => {
                HttpResponse::BadRequest().json(ApiResponse::<()>::error(msg))
            }
            ApiError::UnprocessableEntity(msg) => {
                HttpResponse::UnprocessableEntity().json(ApiResponse::<()>::error(msg))
            }
            ApiError::InternalEyreError(msg) => {
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error(msg.to_string()))
            }
        }
    }
}

impl From<DepositError> for ApiError {
    fn from(err: DepositError) -> Self {
        match &err {
            DepositError::TransactionNotFound(_) => ApiError::NotFound(err.to_string()),
            DepositError::TransactionFailed(_)
            | DepositError::NoTransferEvent(_)
            | DepositError::ForwarderMismatch { .. } => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            DepositError::ForwardRejected(_) => ApiError::UnprocessableEntity(err.to_string()),
            DepositError::Provision(e) => ApiError::from(e.clone()),
            DepositError::Provider(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<ProvisionError> for ApiError {
    fn from(err: ProvisionError) -> Self {
        match err {
            ProvisionError::DerivationMismatch { .. }
            | ProvisionError::DeploymentFailed(_)
            | ProvisionError::Provider(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<WithdrawalError> for ApiError {
    fn from(err: WithdrawalError) -> Self {
        match err {
            WithdrawalError::WithdrawalRejected(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            WithdrawalError::Provider(_) => ApiError::InternalError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderError;
    use alloy::primitives::TxHash;

    #[test]
    fn test_deposit_error_status_mapping() {
        let tx = TxHash::repeat_byte(0xab);

        let err: ApiError = DepositError::TransactionNotFound(tx).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = DepositError::NoTransferEvent(tx).into();
        assert!(matches!(err, ApiError::UnprocessableEntity(_)));

        let err: ApiError = DepositError::Provider(ProviderError::Timeout).into();
        assert!(matches!(err, ApiError::InternalError(_)));
    }

    #[test]
    fn test_withdrawal_rejection_is_client_visible() {
        let err: ApiError = WithdrawalError::WithdrawalRejected("invalid nonce".into()).into();
        match err {
            ApiError::UnprocessableEntity(msg) => assert!(msg.contains("invalid nonce")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
