//! YAML configuration.
//!
//! Loads `config.yaml` into a [`Config`]. Every field is optional in the file;
//! anything left out falls back to the Arbitrum One deployment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::SupportedChainId;

/// ERC-20 token the game and faucet pay out in.
pub const TOKEN_ADDRESS: Address = address!("405DEbce0c54Df382B82d2B227d54cc1cDEe5A92");
/// Token faucet.
pub const FAUCET_ADDRESS: Address = address!("16D218938416d58C58CaC586D57F27fD8CAfBec1");
/// Wen guessing game.
pub const GAME_ADDRESS: Address = address!("F008aa381a575E1b4F909a16D9f1784b25221193");

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Addresses of the three deployed contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contracts {
    pub token: Address,
    pub faucet: Address,
    pub game: Address,
}

impl Default for Contracts {
    fn default() -> Self {
        Self {
            token: TOKEN_ADDRESS,
            faucet: FAUCET_ADDRESS,
            game: GAME_ADDRESS,
        }
    }
}

/// Chain plus contract addresses: everything the adapter needs to address calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deployment {
    pub chain: SupportedChainId,
    pub contracts: Contracts,
}

/// How long to wait for a submitted transaction to be mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptPolling {
    /// Number of `eth_getTransactionReceipt` polls before giving up.
    pub attempts: u32,
    /// Delay between polls, in milliseconds.
    pub interval_ms: u64,
}

impl ReceiptPolling {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for ReceiptPolling {
    fn default() -> Self {
        Self {
            attempts: 60,
            interval_ms: 500,
        }
    }
}

/// Parsed `config.yaml`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chain the contracts live on.
    pub chain_id: SupportedChainId,
    /// JSON-RPC endpoint of the wallet. `None` means no wallet is available.
    pub rpc_url: Option<String>,
    pub contracts: Contracts,
    pub receipt_poll: ReceiptPolling,
    /// Optional JSONL file every notification is appended to.
    pub journal_path: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serialize back to YAML, e.g. to write a starter config.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn deployment(&self) -> Deployment {
        Deployment {
            chain: self.chain_id,
            contracts: self.contracts,
        }
    }
}
