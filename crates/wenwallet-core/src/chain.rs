//! Supported chain identifiers.
//!
//! The game contracts are deployed on Arbitrum One; the other variants exist
//! for testnet deployments and local Anvil nodes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chains the wallet adapter can switch the provider to.
///
/// Each variant carries its well-known numeric chain ID.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum SupportedChainId {
    /// Arbitrum One
    #[default]
    Arbitrum = 42161,
    /// Arbitrum Sepolia
    ArbitrumSepolia = 421614,
    /// Local Anvil / Hardhat node
    Anvil = 31337,
}

impl SupportedChainId {
    /// All supported chain IDs.
    pub const ALL: [SupportedChainId; 3] = [Self::Arbitrum, Self::ArbitrumSepolia, Self::Anvil];

    /// Returns the numeric chain ID.
    pub const fn as_u64(self) -> u64 {
        self as u64
    }

    /// Human-readable chain name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Arbitrum => "Arbitrum One",
            Self::ArbitrumSepolia => "Arbitrum Sepolia",
            Self::Anvil => "Anvil",
        }
    }

    pub const fn is_testnet(self) -> bool {
        !matches!(self, Self::Arbitrum)
    }

    /// `0x`-prefixed hex chain id, as `wallet_switchEthereumChain` expects it.
    pub fn hex_id(self) -> String {
        format!("{:#x}", self.as_u64())
    }
}

impl TryFrom<u64> for SupportedChainId {
    type Error = UnsupportedChainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            42161 => Ok(Self::Arbitrum),
            421614 => Ok(Self::ArbitrumSepolia),
            31337 => Ok(Self::Anvil),
            _ => Err(UnsupportedChainError(value)),
        }
    }
}

impl From<SupportedChainId> for u64 {
    fn from(chain: SupportedChainId) -> u64 {
        chain.as_u64()
    }
}

impl fmt::Display for SupportedChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.as_u64())
    }
}

/// Error when a chain ID is not in the supported set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unsupported chain_id {0}; supported chains: {list}", list = supported_list())]
pub struct UnsupportedChainError(pub u64);

fn supported_list() -> String {
    SupportedChainId::ALL
        .iter()
        .map(|c| format!("{} ({})", c.as_u64(), c.name()))
        .collect::<Vec<_>>()
        .join(", ")
}
