//! # wenwallet
//!
//! Wallet connection adapter for the Wen guessing game, its ERC-20 token and
//! the token faucet.
//!
//! Re-exports the [`wenwallet_core`] state model and the
//! [`wenwallet_evm`] adapter so front ends depend on a single crate.

pub use wenwallet_core::{
    chain, config, journal, notify, types, Config, Deployment, Level, Notification, Notifier,
    SupportedChainId, WalletState,
};
pub use wenwallet_evm::{
    abi, connection, contracts, provider, revert, rpc, Action, ActionError, ActionReceipt,
    ProviderError, RefreshReport, RpcWalletProvider, WalletConnection, WalletProvider,
};

/// Returns the library version string.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
