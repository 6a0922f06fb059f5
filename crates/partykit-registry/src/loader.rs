//! YAML deployment tables.
//!
//! A deployment file holds one document per descriptor, separated by `---`:
//!
//! ```yaml
//! descriptor: party_v1
//! family: party
//! version: "1.0"
//! abi:
//!   - function veto(uint256 proposalId)
//!   - event ProposalPassed(uint256 indexed proposalId)
//! deployments:
//!   mainnet: ["0x…"]
//! ---
//! descriptor: party_v1_redeploy
//! family: party
//! version: "1.0.1"
//! abi_from: party_v1        # same interface, new addresses
//! deployments:
//!   base: ["0x…"]
//! ```
//!
//! Documents are appended in file order, which is the lookup order.

use partykit_core::{parse_address, ContractFamily, NetworkId, RegistryError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::descriptor::InterfaceDescriptor;
use crate::registry::{RegistryEntry, RegistrySet};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DeploymentDoc {
    descriptor: String,
    family: ContractFamily,
    version: String,
    #[serde(default)]
    abi: Vec<String>,
    #[serde(default)]
    abi_from: Option<String>,
    #[serde(default)]
    deployments: BTreeMap<NetworkId, Vec<String>>,
}

pub struct DeploymentParser;

impl DeploymentParser {
    /// Parse every document in `yaml` and append it to `set`.
    ///
    /// `abi_from` may reference any descriptor already in `set` or defined
    /// earlier in the same file. Returns the number of entries appended.
    pub fn append_all(set: &mut RegistrySet, yaml: &str) -> Result<usize, RegistryError> {
        use serde::de::Deserialize as _;

        let mut count = 0;
        for doc in serde_yaml::Deserializer::from_str(yaml) {
            let value = serde_yaml::Value::deserialize(doc)
                .map_err(|e| RegistryError::Parse(e.to_string()))?;
            // Skip null/empty documents (e.g. trailing `---`)
            if value.is_null() {
                continue;
            }
            let raw: DeploymentDoc =
                serde_yaml::from_value(value).map_err(|e| RegistryError::Parse(e.to_string()))?;
            let entry = Self::build_entry(set, raw)?;
            tracing::debug!(
                descriptor = %entry.descriptor,
                networks = entry.deployments.len(),
                "registered interface"
            );
            set.append(entry)?;
            count += 1;
        }
        Ok(count)
    }

    /// Append every document of the file at `path`.
    pub fn append_file(set: &mut RegistrySet, path: &Path) -> Result<usize, RegistryError> {
        let content = std::fs::read_to_string(path)?;
        let count = Self::append_all(set, &content)?;
        if count == 0 {
            return Err(RegistryError::Parse(format!(
                "{}: no deployment documents",
                path.display()
            )));
        }
        Ok(count)
    }

    fn build_entry(set: &RegistrySet, raw: DeploymentDoc) -> Result<RegistryEntry, RegistryError> {
        if set.descriptor(&raw.descriptor).is_some() {
            return Err(RegistryError::Parse(format!(
                "descriptor '{}' defined twice",
                raw.descriptor
            )));
        }

        let descriptor = match (&raw.abi_from, raw.abi.is_empty()) {
            (Some(base), true) => {
                let source = set.descriptor(base).ok_or_else(|| {
                    RegistryError::Parse(format!(
                        "descriptor '{}': abi_from references unknown '{base}'",
                        raw.descriptor
                    ))
                })?;
                if source.family != raw.family {
                    return Err(RegistryError::Parse(format!(
                        "descriptor '{}': abi_from '{base}' is a {} interface",
                        raw.descriptor, source.family
                    )));
                }
                InterfaceDescriptor {
                    name: raw.descriptor.clone(),
                    family: raw.family,
                    version: raw.version.clone(),
                    abi: source.abi.clone(),
                }
            }
            (None, false) => InterfaceDescriptor::from_signatures(
                raw.descriptor.clone(),
                raw.family,
                raw.version.clone(),
                raw.abi.iter().map(String::as_str),
            )?,
            (Some(_), false) => {
                return Err(RegistryError::Parse(format!(
                    "descriptor '{}': set either abi or abi_from, not both",
                    raw.descriptor
                )))
            }
            (None, true) => {
                return Err(RegistryError::Parse(format!(
                    "descriptor '{}': missing abi",
                    raw.descriptor
                )))
            }
        };

        let mut entry = RegistryEntry::new(Arc::new(descriptor));
        for (network, addresses) in raw.deployments {
            let parsed = addresses
                .iter()
                .map(|value| {
                    parse_address(value).map_err(|reason| RegistryError::InvalidAddress {
                        value: value.clone(),
                        reason,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            entry = entry.with_addresses(network, parsed);
        }
        Ok(entry)
    }
}
