//! JSON-RPC wallet provider.
//!
//! Connects to a wallet's EIP-1193 compatible JSON-RPC endpoint (a wallet
//! daemon, or a dev node with unlocked accounts) and forwards every request
//! to it. Signing happens on the other side of the connection.

use alloy::network::Ethereum;
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tracing::debug;

use wenwallet_core::chain::SupportedChainId;
use wenwallet_core::config::ReceiptPolling;

use crate::provider::{ProviderError, Result, WalletProvider};

/// A [`WalletProvider`] backed by an HTTP JSON-RPC endpoint.
pub struct RpcWalletProvider {
    provider: DynProvider<Ethereum>,
    rpc_url: String,
    polling: ReceiptPolling,
}

impl std::fmt::Debug for RpcWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletProvider")
            .field("rpc_url", &self.rpc_url)
            .field("polling", &self.polling)
            .finish()
    }
}

impl RpcWalletProvider {
    /// Creates a provider for the given RPC URL.
    pub fn new(rpc_url: &str) -> Result<Self> {
        let url: alloy::transports::http::reqwest::Url = rpc_url
            .parse()
            .map_err(|e| ProviderError::UrlParse(format!("{e}")))?;

        let provider = ProviderBuilder::new().connect_http(url).erased();

        Ok(Self {
            provider,
            rpc_url: rpc_url.to_string(),
            polling: ReceiptPolling::default(),
        })
    }

    /// Override how long [`WalletProvider::wait_for_inclusion`] polls.
    pub fn with_receipt_polling(mut self, polling: ReceiptPolling) -> Self {
        self.polling = polling;
        self
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.provider.get_accounts().await?)
    }

    async fn request_accounts(&self) -> Result<Vec<Address>> {
        Ok(self
            .provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
            .await?)
    }

    async fn switch_chain(&self, chain: SupportedChainId) -> Result<()> {
        let current = self.provider.get_chain_id().await?;
        if current == chain.as_u64() {
            return Ok(());
        }

        debug!(from = current, to = chain.as_u64(), "switching wallet chain");
        let params = serde_json::json!([{ "chainId": chain.hex_id() }]);
        self.provider
            .raw_request::<_, serde_json::Value>("wallet_switchEthereumChain".into(), params)
            .await?;
        Ok(())
    }

    async fn call(&self, tx: TransactionRequest) -> Result<Bytes> {
        Ok(self.provider.call(tx).await?)
    }

    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256> {
        let pending = self.provider.send_transaction(tx).await?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_inclusion(&self, tx_hash: B256) -> Result<()> {
        for _ in 0..self.polling.attempts {
            if let Some(receipt) = self.provider.get_transaction_receipt(tx_hash).await? {
                if receipt.status() {
                    return Ok(());
                }
                return Err(ProviderError::Reverted(Bytes::new()));
            }
            tokio::time::sleep(self.polling.interval()).await;
        }
        Err(ProviderError::Timeout(tx_hash, self.polling.attempts))
    }
}
