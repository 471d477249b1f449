//! # API Module
//!
//! HTTP surface of the relayer: route registration, request controllers
//! and the OpenAPI document served at `/api/v1/openapi.json`.

pub mod controllers;
pub mod routes;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Relayer", description = "Gasless deposit and withdrawal relaying. The relayer verifies on-chain deposits, provisions per-user forwarding contracts and submits user-authorized withdrawals, paying gas on behalf of users."),
        (name = "Health", description = "Service liveness.")
    ),
    info(
        description = "Gasless custodial relayer API",
        version = "0.1.0",
        title = "Gasless Relayer API"
    ),
    paths(
        routes::relayer::process_deposit,
        routes::relayer::create_forwarder,
        routes::relayer::process_withdrawal,
        routes::health::health,
    )
)]
pub struct ApiDoc;
