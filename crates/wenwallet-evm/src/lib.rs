//! # wenwallet-evm
//!
//! Wallet adapter for the Wen game contracts: account access, contract reads,
//! transaction submission and revert decoding.
//!
//! ## Modules
//!
//! - [`abi`]: contract ABI definitions using alloy's `sol!` macro
//! - [`provider`]: the [`WalletProvider`] seam and its error type
//! - [`rpc`]: a [`WalletProvider`] backed by a JSON-RPC node
//! - [`contracts`]: typed contract reads and writes
//! - [`revert`]: user-facing descriptions of failed transactions
//! - [`connection`]: the stateful [`WalletConnection`] adapter

pub mod abi;
pub mod connection;
pub mod contracts;
pub mod provider;
pub mod revert;
pub mod rpc;

// Re-export key types for convenience.
pub use connection::{
    Action, ActionError, ActionReceipt, ReadFailure, RefreshReport, Section, WalletConnection,
};
pub use provider::{ProviderError, WalletProvider};
pub use rpc::RpcWalletProvider;

// Re-export alloy primitives used in the public API.
pub use alloy::primitives::{Address, B256, U256};
