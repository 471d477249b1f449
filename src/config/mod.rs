//! Server configuration, read from environment variables.

use std::env;

use alloy::primitives::{Address, B256};

use crate::{
    constants::{DEFAULT_CONFIRMATION_TIMEOUT_MS, DEFAULT_RPC_TIMEOUT_MS},
    models::SecretString,
};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The host address the server will bind to.
    pub host: String,
    /// The port number the server will listen on.
    pub port: u16,
    /// URL of the ledger RPC endpoint.
    pub rpc_url: String,
    /// Private key of the relayer account paying transaction fees.
    pub relayer_private_key: SecretString,
    /// Address of the custodial wallet factory contract.
    pub wallet_factory_address: Address,
    /// Address of the CREATE2 forwarder factory contract.
    pub forwarder_factory_address: Address,
    /// Address of the deposit token contract.
    pub token_address: Address,
    /// keccak256 of the forwarder creation bytecode, used for local CREATE2
    /// derivation. Must match the factory deployment.
    pub forwarder_init_code_hash: B256,
    /// Timeout for individual RPC requests, in milliseconds.
    pub rpc_timeout_ms: u64,
    /// Timeout when waiting for transaction confirmation, in milliseconds.
    pub confirmation_timeout_ms: u64,
    /// The number of requests allowed per second.
    pub rate_limit_requests_per_second: u64,
    /// The maximum burst size for rate limiting.
    pub rate_limit_burst_size: u32,
}

impl ServerConfig {
    /// Creates a new `ServerConfig` instance from environment variables.
    ///
    /// # Panics
    ///
    /// Panics if `RELAYER_PRIVATE_KEY`, `WALLET_FACTORY_ADDRESS`,
    /// `FORWARDER_FACTORY_ADDRESS`, `TOKEN_ADDRESS` or
    /// `FORWARDER_INIT_CODE_HASH` are unset or unparsable, as the relayer
    /// cannot function without them.
    ///
    /// # Defaults
    ///
    /// - `HOST` defaults to `"0.0.0.0"`.
    /// - `APP_PORT` defaults to `3001`.
    /// - `RPC_URL` defaults to `"http://127.0.0.1:8545"`.
    /// - `RPC_TIMEOUT_MS` defaults to 30000, `CONFIRMATION_TIMEOUT_MS` to 60000.
    /// - `RATE_LIMIT_REQUESTS_PER_SECOND` defaults to `100`,
    ///   `RATE_LIMIT_BURST_SIZE` to `300`.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("APP_PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .unwrap_or(3001),
            rpc_url: env::var("RPC_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string()),
            relayer_private_key: SecretString::new(
                &env::var("RELAYER_PRIVATE_KEY").expect("RELAYER_PRIVATE_KEY must be set"),
            ),
            wallet_factory_address: required_address("WALLET_FACTORY_ADDRESS"),
            forwarder_factory_address: required_address("FORWARDER_FACTORY_ADDRESS"),
            token_address: required_address("TOKEN_ADDRESS"),
            forwarder_init_code_hash: env::var("FORWARDER_INIT_CODE_HASH")
                .expect("FORWARDER_INIT_CODE_HASH must be set")
                .parse()
                .expect("FORWARDER_INIT_CODE_HASH must be a 32-byte hex value"),
            rpc_timeout_ms: env_u64("RPC_TIMEOUT_MS", DEFAULT_RPC_TIMEOUT_MS),
            confirmation_timeout_ms: env_u64(
                "CONFIRMATION_TIMEOUT_MS",
                DEFAULT_CONFIRMATION_TIMEOUT_MS,
            ),
            rate_limit_requests_per_second: env_u64("RATE_LIMIT_REQUESTS_PER_SECOND", 100),
            rate_limit_burst_size: env::var("RATE_LIMIT_BURST_SIZE")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .unwrap_or(300),
        }
    }
}

fn required_address(var: &str) -> Address {
    env::var(var)
        .unwrap_or_else(|_| panic!("{} must be set", var))
        .parse()
        .unwrap_or_else(|_| panic!("{} must be a valid address", var))
}

fn env_u64(var: &str, default: u64) -> u64 {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;
    use std::sync::Mutex;

    // Tests mutate process-wide env vars; serialize them.
    lazy_static! {
        static ref ENV_MUTEX: Mutex<()> = Mutex::new(());
    }

    fn setup() {
        for var in [
            "HOST",
            "APP_PORT",
            "RPC_URL",
            "RPC_TIMEOUT_MS",
            "CONFIRMATION_TIMEOUT_MS",
            "RATE_LIMIT_REQUESTS_PER_SECOND",
            "RATE_LIMIT_BURST_SIZE",
        ] {
            env::remove_var(var);
        }

        env::set_var(
            "RELAYER_PRIVATE_KEY",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        );
        env::set_var(
            "WALLET_FACTORY_ADDRESS",
            "0x5FbDB2315678afecb367f032d93F642f64180aa3",
        );
        env::set_var(
            "FORWARDER_FACTORY_ADDRESS",
            "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512",
        );
        env::set_var(
            "TOKEN_ADDRESS",
            "0x9fE46736679d2D9a65F0992F2272dE9f3c7fa6e0",
        );
        env::set_var(
            "FORWARDER_INIT_CODE_HASH",
            "0x1111111111111111111111111111111111111111111111111111111111111111",
        );
    }

    #[test]
    fn test_default_values() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        setup();

        let config = ServerConfig::from_env();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(config.rpc_timeout_ms, DEFAULT_RPC_TIMEOUT_MS);
        assert_eq!(config.confirmation_timeout_ms, DEFAULT_CONFIRMATION_TIMEOUT_MS);
        assert_eq!(config.rate_limit_requests_per_second, 100);
        assert_eq!(config.rate_limit_burst_size, 300);
    }

    #[test]
    fn test_custom_values() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        setup();
        env::set_var("HOST", "127.0.0.1");
        env::set_var("APP_PORT", "8080");
        env::set_var("RPC_URL", "https://rpc.example.org");
        env::set_var("RPC_TIMEOUT_MS", "5000");

        let config = ServerConfig::from_env();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.rpc_url, "https://rpc.example.org");
        assert_eq!(config.rpc_timeout_ms, 5000);
    }

    #[test]
    fn test_invalid_numeric_values_fall_back_to_defaults() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        setup();
        env::set_var("APP_PORT", "not_a_number");
        env::set_var("RPC_TIMEOUT_MS", "also_not_a_number");

        let config = ServerConfig::from_env();

        assert_eq!(config.port, 3001);
        assert_eq!(config.rpc_timeout_ms, DEFAULT_RPC_TIMEOUT_MS);
    }

    #[test]
    #[should_panic(expected = "WALLET_FACTORY_ADDRESS must be a valid address")]
    fn test_malformed_address_panics() {
        let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        setup();
        env::set_var("WALLET_FACTORY_ADDRESS", "0x1234");

        let _ = ServerConfig::from_env();
    }
}
