//! Gasless Deposit Relayer Library
//!
//! This library implements a stateless relayer for a custodial gasless
//! deposit/withdrawal system. Users fund a deterministic per-user forwarding
//! contract; the relayer verifies the deposit on-chain, provisions the
//! forwarder when missing and pushes the funds into the custodial wallet
//! factory. Withdrawals are authorized off-chain by the user's signature and
//! submitted on-chain by the relayer, which pays the transaction fees.
//!
//! # Module Structure
//!
//! - `config`: Environment-driven server configuration
//! - `constants`: Protocol constants (salt, decimals, timeouts)
//! - `logging`: Logging setup
//! - `models`: Request/response types, domain data and error taxonomy
//! - `services`: Ledger access (alloy-backed EVM client)
//! - `domain`: Deposit verification, forwarder provisioning and withdrawal relay
//! - `api`: HTTP routes and controllers

pub mod api;
pub mod config;
pub mod constants;
pub mod domain;
pub mod logging;
pub mod models;
pub mod services;

pub use models::{ApiError, AppState};
