//! HTTP routes for the three relayer operations.

use actix_web::{post, web, Responder};

use crate::{
    api::controllers::relayer,
    models::{
        ApiResponse, AppState, DepositRequest, DepositResponse, ForwarderRequest,
        ForwarderResponse, WithdrawalRequest, WithdrawalResponse,
    },
    ApiError,
};

/// Verify a deposit transaction and forward the funds into the custodial
/// wallet.
#[utoipa::path(
    post,
    path = "/api/v1/deposits",
    tag = "Relayer",
    operation_id = "processDeposit",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Deposit verified and forwarded", body = ApiResponse<DepositResponse>),
        (status = 400, description = "Malformed transaction hash", body = ApiResponse<String>),
        (status = 404, description = "Transaction not found", body = ApiResponse<String>),
        (status = 422, description = "Deposit not attributable to the claimed owner", body = ApiResponse<String>),
        (status = 500, description = "Ledger unavailable", body = ApiResponse<String>),
    )
)]
#[post("/deposits")]
pub async fn process_deposit(
    request: web::Json<DepositRequest>,
    state: web::ThinData<AppState>,
) -> Result<impl Responder, ApiError> {
    relayer::process_deposit(request.into_inner(), state).await
}

/// Provision the forwarding contract for an owner, deploying it only if
/// absent.
#[utoipa::path(
    post,
    path = "/api/v1/forwarders",
    tag = "Relayer",
    operation_id = "createForwarder",
    request_body = ForwarderRequest,
    responses(
        (status = 200, description = "Forwarder address (deployed or pre-existing)", body = ApiResponse<ForwarderResponse>),
        (status = 400, description = "Malformed owner address", body = ApiResponse<String>),
        (status = 500, description = "Deployment could not be confirmed", body = ApiResponse<String>),
    )
)]
#[post("/forwarders")]
pub async fn create_forwarder(
    request: web::Json<ForwarderRequest>,
    state: web::ThinData<AppState>,
) -> Result<impl Responder, ApiError> {
    relayer::create_forwarder(request.into_inner(), state).await
}

/// Relay a user-signed withdrawal authorization.
#[utoipa::path(
    post,
    path = "/api/v1/withdrawals",
    tag = "Relayer",
    operation_id = "processWithdrawal",
    request_body = WithdrawalRequest,
    responses(
        (status = 200, description = "Withdrawal confirmed", body = ApiResponse<WithdrawalResponse>),
        (status = 400, description = "Malformed authorization", body = ApiResponse<String>),
        (status = 422, description = "Rejected by the ledger (nonce/signature/balance)", body = ApiResponse<String>),
        (status = 500, description = "Ledger unavailable", body = ApiResponse<String>),
    )
)]
#[post("/withdrawals")]
pub async fn process_withdrawal(
    request: web::Json<WithdrawalRequest>,
    state: web::ThinData<AppState>,
) -> Result<impl Responder, ApiError> {
    relayer::process_withdrawal(request.into_inner(), state).await
}

pub fn init(cfg: &mut web::ServiceConfig) {
    cfg.service(process_deposit)
        .service(create_forwarder)
        .service(process_withdrawal);
}
