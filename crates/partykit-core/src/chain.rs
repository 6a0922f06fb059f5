//! Network identifiers for every chain the protocol was deployed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported EVM network.
/// Used as the key when selecting deployment addresses from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkId {
    Mainnet,
    Goerli,
    Sepolia,
    Base,
    BaseGoerli,
    BaseSepolia,
    Zora,
}

impl NetworkId {
    /// Every known network, in declaration order.
    pub const ALL: [NetworkId; 7] = [
        NetworkId::Mainnet,
        NetworkId::Goerli,
        NetworkId::Sepolia,
        NetworkId::Base,
        NetworkId::BaseGoerli,
        NetworkId::BaseSepolia,
        NetworkId::Zora,
    ];

    /// EIP-155 chain id.
    pub fn chain_id(self) -> u64 {
        match self {
            NetworkId::Mainnet => 1,
            NetworkId::Goerli => 5,
            NetworkId::Sepolia => 11_155_111,
            NetworkId::Base => 8453,
            NetworkId::BaseGoerli => 84_531,
            NetworkId::BaseSepolia => 84_532,
            NetworkId::Zora => 7_777_777,
        }
    }

    pub fn from_chain_id(chain_id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.chain_id() == chain_id)
    }

    /// Human-readable slug, e.g. `"base-sepolia"`.
    pub fn slug(self) -> &'static str {
        match self {
            NetworkId::Mainnet => "mainnet",
            NetworkId::Goerli => "goerli",
            NetworkId::Sepolia => "sepolia",
            NetworkId::Base => "base",
            NetworkId::BaseGoerli => "base-goerli",
            NetworkId::BaseSepolia => "base-sepolia",
            NetworkId::Zora => "zora",
        }
    }

    pub fn is_testnet(self) -> bool {
        matches!(
            self,
            NetworkId::Goerli | NetworkId::Sepolia | NetworkId::BaseGoerli | NetworkId::BaseSepolia
        )
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a network name or chain id is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for NetworkId {
    type Err = UnknownNetwork;

    /// Accepts slugs (`mainnet`, `base-sepolia`), a few aliases, or a decimal chain id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase().replace('_', "-");
        let by_name = match lower.as_str() {
            "mainnet" | "ethereum" | "eth" | "homestead" => Some(NetworkId::Mainnet),
            "goerli" => Some(NetworkId::Goerli),
            "sepolia" => Some(NetworkId::Sepolia),
            "base" => Some(NetworkId::Base),
            "base-goerli" => Some(NetworkId::BaseGoerli),
            "base-sepolia" => Some(NetworkId::BaseSepolia),
            "zora" => Some(NetworkId::Zora),
            _ => None,
        };
        by_name
            .or_else(|| lower.parse::<u64>().ok().and_then(NetworkId::from_chain_id))
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}
