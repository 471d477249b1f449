//! # Relayer Controller
//!
//! Translates HTTP request bodies into typed domain inputs, invokes the
//! orchestrator and wraps the result in the API response envelope. All
//! parsing happens here, before any ledger call, so malformed input is
//! rejected cheaply.

use actix_web::{web, HttpResponse};

use crate::models::{
    ApiResponse, AppState, DepositRequest, DepositResponse, ForwarderRequest, ForwarderResponse,
    WithdrawalRequest, WithdrawalResponse,
};
use crate::ApiError;

pub async fn process_deposit(
    request: DepositRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let tx_hash = request.parse().map_err(ApiError::BadRequest)?;

    let forward_tx = state.relayer.process_deposit(tx_hash).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(DepositResponse {
        tx_hash: forward_tx.to_string(),
    })))
}

pub async fn create_forwarder(
    request: ForwarderRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let owner = request.parse().map_err(ApiError::BadRequest)?;

    let (forwarder_address, deployed) = state.relayer.create_forwarder(owner).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(ForwarderResponse {
        forwarder_address: forwarder_address.to_string(),
        deployed,
    })))
}

pub async fn process_withdrawal(
    request: WithdrawalRequest,
    state: web::ThinData<AppState>,
) -> Result<HttpResponse, ApiError> {
    let auth = request.parse().map_err(ApiError::BadRequest)?;

    let (tx_hash, next_nonce) = state.relayer.process_withdrawal(&auth).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(WithdrawalResponse {
        tx_hash: tx_hash.to_string(),
        next_nonce: next_nonce.to_string(),
    })))
}
