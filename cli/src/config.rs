//! `partykit.yaml`: RPC endpoints, timeouts and registry extensions.
//!
//! ```yaml
//! networks:
//!   base:
//!     rpc_url: https://mainnet.base.org
//!   mainnet:
//!     rpc_url: https://eth.llamarpc.com
//!     multicall: "0xcA11bde05977b3631167028862bE2a173976CA11"
//! request_timeout_ms: 20000
//! deployments:
//!   - ./deployments/local.yaml
//! log:
//!   level: info,partykit_rpc=debug
//! ```

use alloy_primitives::Address;
use anyhow::{Context, Result};
use partykit_core::NetworkId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::LogConfig;

/// Per-network connection settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    /// Multicall3 deployment, when not at the canonical address.
    #[serde(default)]
    pub multicall: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartykitConfig {
    #[serde(default)]
    pub networks: BTreeMap<NetworkId, NetworkConfig>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Seaport deployment used for order status reads.
    #[serde(default)]
    pub marketplace: Option<Address>,
    /// Extra deployment tables appended after the bundled ones.
    #[serde(default)]
    pub deployments: Vec<PathBuf>,
    #[serde(default)]
    pub log: LogConfig,
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for PartykitConfig {
    fn default() -> Self {
        Self {
            networks: BTreeMap::new(),
            request_timeout_ms: default_request_timeout_ms(),
            marketplace: None,
            deployments: Vec::new(),
            log: LogConfig::default(),
        }
    }
}

/// Environment variable holding the RPC URL for `network`,
/// e.g. `PARTYKIT_RPC_BASE_SEPOLIA`.
pub fn rpc_env_var(network: NetworkId) -> String {
    format!("PARTYKIT_RPC_{}", network.slug().to_ascii_uppercase().replace('-', "_"))
}

impl PartykitConfig {
    /// Load from `path`, or defaults when no config file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        let mut config = Self::from_yaml(&yaml)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        // Deployment paths are relative to the config file.
        if let Some(dir) = path.parent() {
            for deployment in &mut config.deployments {
                if deployment.is_relative() {
                    *deployment = dir.join(&*deployment);
                }
            }
        }
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn multicall(&self, network: NetworkId) -> Option<Address> {
        self.networks.get(&network).and_then(|n| n.multicall)
    }

    /// RPC URL for `network`; the environment wins over the file.
    pub fn rpc_url(&self, network: NetworkId) -> Option<String> {
        self.rpc_url_with(network, |key| std::env::var(key).ok())
    }

    pub fn rpc_url_with<F>(&self, network: NetworkId, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(&rpc_env_var(network))
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.networks.get(&network).and_then(|n| n.rpc_url.clone()))
    }
}
