//! EVM implementation of [`LedgerClient`] over an alloy HTTP provider.

use std::time::Duration;

use alloy::{
    network::{Ethereum, EthereumWallet},
    primitives::{Address, Bytes, TxHash, TxKind, B256, U256},
    providers::{
        fillers::{
            BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller,
            WalletFiller,
        },
        Identity, PendingTransactionError, Provider, ProviderBuilder, RootProvider,
    },
    rpc::{
        client::ClientBuilder,
        types::{TransactionInput, TransactionRequest},
    },
    signers::local::PrivateKeySigner,
    sol_types::SolCall,
    transports::{
        http::{Client, Http},
        RpcError, TransportErrorKind,
    },
};
use async_trait::async_trait;
use reqwest::ClientBuilder as ReqwestClientBuilder;

use super::{
    abi::{IDepositForwarder, IForwarderFactory, IWalletFactory},
    retry_read_call, LedgerClient, RetryConfig,
};
use crate::models::{ProviderError, SecretString, TxOutcome};

/// HTTP provider with gas/nonce/chain-id fillers and the relayer's wallet.
type LedgerProvider = FillProvider<
    JoinFill<
        JoinFill<
            Identity,
            JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
        >,
        WalletFiller<EthereumWallet>,
    >,
    RootProvider<Http<Client>>,
    Http<Client>,
    Ethereum,
>;

pub struct EvmLedgerClient {
    provider: LedgerProvider,
    relayer_address: Address,
    forwarder_factory: Address,
    wallet_factory: Address,
    confirmation_timeout: Duration,
    retry_config: RetryConfig,
}

impl EvmLedgerClient {
    /// Build a client from the relayer's signing key and the deployed
    /// contract addresses.
    pub fn new(
        rpc_url: &str,
        private_key: &SecretString,
        forwarder_factory: Address,
        wallet_factory: Address,
        rpc_timeout_ms: u64,
        confirmation_timeout_ms: u64,
    ) -> Result<Self, ProviderError> {
        let signer: PrivateKeySigner = private_key
            .as_str(|key| key.parse())
            .map_err(|_| ProviderError::NetworkConfiguration("invalid relayer key".to_string()))?;
        let relayer_address = signer.address();

        let rpc_url = rpc_url.parse().map_err(|e| {
            ProviderError::NetworkConfiguration(format!("Invalid URL format: {}", e))
        })?;

        let http_client = ReqwestClientBuilder::default()
            .timeout(Duration::from_millis(rpc_timeout_ms))
            .build()
            .map_err(|e| ProviderError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let mut transport = Http::new(rpc_url);
        transport.set_client(http_client);

        let is_local = transport.guess_local();
        let client = ClientBuilder::default().transport(transport, is_local);

        let provider = ProviderBuilder::new()
            .with_recommended_fillers()
            .wallet(EthereumWallet::from(signer))
            .on_client(client);

        Ok(Self {
            provider,
            relayer_address,
            forwarder_factory,
            wallet_factory,
            confirmation_timeout: Duration::from_millis(confirmation_timeout_ms),
            retry_config: RetryConfig::default(),
        })
    }

    /// Address of the account paying the transaction fees.
    pub fn relayer_address(&self) -> Address {
        self.relayer_address
    }

    async fn read_contract(&self, to: Address, input: Bytes) -> Result<Bytes, ProviderError> {
        let tx = TransactionRequest {
            to: Some(TxKind::Call(to)),
            input: TransactionInput::new(input),
            ..Default::default()
        };
        self.provider.call(&tx).await.map_err(classify_rpc_error)
    }

    /// Submit one transaction from the relayer account and wait for its
    /// confirmation. Never resubmits: a transient failure after submission
    /// could otherwise double-spend the effect.
    async fn submit(&self, to: Address, input: Bytes) -> Result<TxOutcome, ProviderError> {
        let tx = TransactionRequest {
            from: Some(self.relayer_address),
            to: Some(TxKind::Call(to)),
            input: TransactionInput::new(input),
            ..Default::default()
        };

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(classify_rpc_error)?;

        let receipt = pending
            .with_timeout(Some(self.confirmation_timeout))
            .get_receipt()
            .await
            .map_err(classify_watch_error)?;

        Ok(TxOutcome::from_receipt(receipt))
    }
}

#[async_trait]
impl LedgerClient for EvmLedgerClient {
    async fn get_code(&self, address: Address) -> Result<Bytes, ProviderError> {
        retry_read_call(&self.retry_config, "get_code", || async {
            self.provider
                .get_code_at(address)
                .await
                .map_err(classify_rpc_error)
        })
        .await
    }

    async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<TxOutcome>, ProviderError> {
        let receipt = retry_read_call(&self.retry_config, "get_transaction_receipt", || async {
            self.provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(classify_rpc_error)
        })
        .await?;

        Ok(receipt.map(TxOutcome::from_receipt))
    }

    async fn get_forwarder_address(
        &self,
        owner: Address,
        salt: B256,
    ) -> Result<Address, ProviderError> {
        let input: Bytes = IForwarderFactory::getForwarderAddressCall { owner, salt }
            .abi_encode()
            .into();

        let output = retry_read_call(&self.retry_config, "get_forwarder_address", || {
            self.read_contract(self.forwarder_factory, input.clone())
        })
        .await?;

        let decoded = IForwarderFactory::getForwarderAddressCall::abi_decode_returns(&output, true)
            .map_err(|e| {
                ProviderError::Other(format!("failed to decode getForwarderAddress return: {}", e))
            })?;
        Ok(decoded.forwarder)
    }

    async fn deploy_forwarder(
        &self,
        owner: Address,
        salt: B256,
    ) -> Result<TxOutcome, ProviderError> {
        let input: Bytes = IForwarderFactory::deployForwarderCall { owner, salt }
            .abi_encode()
            .into();
        self.submit(self.forwarder_factory, input).await
    }

    async fn forward_deposit(
        &self,
        forwarder: Address,
        amount: U256,
        owner: Address,
    ) -> Result<TxOutcome, ProviderError> {
        let input: Bytes = IDepositForwarder::forwardDepositCall { amount, owner }
            .abi_encode()
            .into();
        self.submit(forwarder, input).await
    }

    async fn withdraw_gasless(
        &self,
        user: Address,
        amount: U256,
        nonce: U256,
        signature: Bytes,
    ) -> Result<TxOutcome, ProviderError> {
        let input: Bytes = IWalletFactory::withdrawToOriginalAccountGaslessCall {
            user,
            amount,
            nonce,
            signature,
        }
        .abi_encode()
        .into();
        self.submit(self.wallet_factory, input).await
    }

    async fn get_withdraw_nonce(&self, owner: Address) -> Result<U256, ProviderError> {
        let input: Bytes = IWalletFactory::getWithdrawNonceCall { owner }.abi_encode().into();

        let output = retry_read_call(&self.retry_config, "get_withdraw_nonce", || {
            self.read_contract(self.wallet_factory, input.clone())
        })
        .await?;

        let decoded = IWalletFactory::getWithdrawNonceCall::abi_decode_returns(&output, true)
            .map_err(|e| {
                ProviderError::Other(format!("failed to decode getWithdrawNonce return: {}", e))
            })?;
        Ok(decoded.nonce)
    }
}

/// Map an RPC error onto the provider taxonomy. Revert payloads are kept
/// verbatim so the ledger's rejection reason reaches the caller.
fn classify_rpc_error(err: RpcError<TransportErrorKind>) -> ProviderError {
    match err {
        RpcError::ErrorResp(payload) => {
            let message = payload.message.to_string();
            if message.to_lowercase().contains("revert") {
                ProviderError::Revert(message)
            } else {
                ProviderError::RequestError(message)
            }
        }
        RpcError::Transport(kind) => match kind {
            TransportErrorKind::HttpError(http) if http.status == 429 => ProviderError::RateLimited,
            TransportErrorKind::HttpError(http) if (502..=504).contains(&http.status) => {
                ProviderError::BadGateway
            }
            other => {
                let message = other.to_string();
                if message.to_lowercase().contains("timeout")
                    || message.to_lowercase().contains("timed out")
                {
                    ProviderError::Timeout
                } else {
                    ProviderError::RequestError(message)
                }
            }
        },
        other => ProviderError::Other(other.to_string()),
    }
}

fn classify_watch_error(err: PendingTransactionError) -> ProviderError {
    let message = err.to_string();
    if message.to_lowercase().contains("timeout") || message.to_lowercase().contains("timed out") {
        ProviderError::Timeout
    } else {
        ProviderError::Other(format!("confirmation watch failed: {}", message))
    }
}
