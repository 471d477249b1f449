//! # Gasless Relayer
//!
//! A custodial deposit and withdrawal relayer. Users never hold the chain's
//! native fee token; the relayer verifies their on-chain deposits, provisions
//! per-user forwarding contracts and submits their signed withdrawal
//! authorizations, paying gas from its own funded account.
//!
//! ## Architecture
//!
//! The service is built using Actix-web and provides:
//! - HTTP endpoints for deposit, forwarder and withdrawal processing
//! - A ledger client over JSON-RPC with retries for read calls
//! - CREATE2-based forwarder address derivation
//!
//! ## Usage
//!
//! ```bash
//! cargo run
//! ```

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    middleware::{self, Logger},
    web, App, HttpServer,
};
use color_eyre::{
    eyre::{eyre, WrapErr},
    Result,
};
use dotenvy::dotenv;
use log::info;

use gasless_relayer::{
    config::ServerConfig,
    constants::forwarder_salt,
    domain::{ContractSet, Relayer},
    logging::setup_logging,
    services::EvmLedgerClient,
    AppState,
};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize error reporting with eyre
    color_eyre::install().wrap_err("Failed to initialize error reporting")?;

    dotenv().ok();
    setup_logging();

    let config = Arc::new(ServerConfig::from_env());

    let ledger = EvmLedgerClient::new(
        &config.rpc_url,
        &config.relayer_private_key,
        config.forwarder_factory_address,
        config.wallet_factory_address,
        config.rpc_timeout_ms,
        config.confirmation_timeout_ms,
    )
    .wrap_err("Failed to initialize ledger client")?;
    info!("Relayer account: {}", ledger.relayer_address());

    let contracts = ContractSet {
        deposit_token: config.token_address,
        forwarder_factory: config.forwarder_factory_address,
        forwarder_init_code_hash: config.forwarder_init_code_hash,
        salt: forwarder_salt(),
    };

    let app_state = AppState::new(Relayer::new(Arc::new(ledger), contracts));

    // Rate limit configuration
    let rate_limit_config = GovernorConfigBuilder::default()
        .requests_per_second(config.rate_limit_requests_per_second)
        .burst_size(config.rate_limit_burst_size)
        .finish()
        .ok_or_else(|| eyre!("Invalid rate limit configuration"))?;

    info!("Starting server on {}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&rate_limit_config))
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .wrap(Logger::default())
            .app_data(web::ThinData(app_state.clone()))
            .service(web::scope("/api/v1").configure(gasless_relayer::api::routes::configure_routes))
    })
    .bind((config.host.as_str(), config.port))
    .wrap_err_with(|| format!("Failed to bind server to {}:{}", config.host, config.port))?
    .shutdown_timeout(5)
    .run()
    .await
    .wrap_err("Server runtime error")
}
