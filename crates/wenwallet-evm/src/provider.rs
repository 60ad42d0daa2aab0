//! Wallet provider interface.
//!
//! A [`WalletProvider`] is whatever holds the user's keys and talks to the
//! chain: an injected browser wallet, a wallet daemon, or a dev node with
//! unlocked accounts. The adapter only ever asks it for accounts, calls and
//! signed submissions; it never sees key material.

use alloy::primitives::{Address, Bytes, B256};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::TransportError;
use async_trait::async_trait;
use thiserror::Error;

use wenwallet_core::chain::SupportedChainId;

/// EIP-1193 "user rejected the request" error code.
pub const USER_REJECTED_CODE: i64 = 4001;

/// Errors from a wallet provider.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("RPC error: {0}")]
    Rpc(String),
    #[error("request rejected in wallet")]
    Rejected,
    #[error("execution reverted ({} bytes of revert data)", .0.len())]
    Reverted(Bytes),
    #[error("ABI decode error: {0}")]
    AbiDecode(String),
    #[error("wallet returned no accounts")]
    NoAccounts,
    #[error("transaction {0} not mined after {1} polls")]
    Timeout(B256, u32),
    #[error("URL parse error: {0}")]
    UrlParse(String),
}

impl From<TransportError> for ProviderError {
    fn from(err: TransportError) -> Self {
        if let Some(payload) = err.as_error_resp() {
            if payload.code == USER_REJECTED_CODE {
                return Self::Rejected;
            }
            if let Some(data) = payload.as_revert_data() {
                return Self::Reverted(data);
            }
        }
        Self::Rpc(err.to_string())
    }
}

/// Result alias for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// The wallet the adapter drives.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts the wallet has already authorised for this origin. Never prompts.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// Ask the user to authorise accounts. May prompt.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// Make sure subsequent calls go to `chain`.
    async fn switch_chain(&self, chain: SupportedChainId) -> Result<()>;

    /// `eth_call`: execute without submitting, return the raw output.
    async fn call(&self, tx: TransactionRequest) -> Result<Bytes>;

    /// `eth_sendTransaction`: have the wallet sign and submit.
    async fn send_transaction(&self, tx: TransactionRequest) -> Result<B256>;

    /// Wait until `tx_hash` is mined successfully.
    async fn wait_for_inclusion(&self, _tx_hash: B256) -> Result<()> {
        Ok(())
    }
}
