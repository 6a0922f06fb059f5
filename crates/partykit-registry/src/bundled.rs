//! Deployment tables compiled into the binary.

use partykit_core::RegistryError;
use std::path::Path;
use std::sync::OnceLock;

use crate::loader::DeploymentParser;
use crate::registry::RegistrySet;

/// Bundled tables in load order. Families never share a descriptor name, so
/// the file order only matters for `abi_from` references within a file.
const BUNDLED: &[(&str, &str)] = &[
    ("party.yaml", include_str!("../data/party.yaml")),
    ("execution_engine.yaml", include_str!("../data/execution_engine.yaml")),
    ("crowdfunds.yaml", include_str!("../data/crowdfunds.yaml")),
    ("factories.yaml", include_str!("../data/factories.yaml")),
    ("periphery.yaml", include_str!("../data/periphery.yaml")),
];

static BUNDLED_SET: OnceLock<Result<RegistrySet, String>> = OnceLock::new();

impl RegistrySet {
    /// The process-wide registry built from the bundled tables.
    /// Parsed on first use and never mutated afterwards.
    pub fn bundled() -> Result<&'static RegistrySet, RegistryError> {
        BUNDLED_SET
            .get_or_init(|| Self::load_bundled().map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| RegistryError::Parse(e.clone()))
    }

    /// Parse the bundled tables into a fresh, owned set.
    pub fn load_bundled() -> Result<RegistrySet, RegistryError> {
        let mut set = RegistrySet::new();
        for (name, yaml) in BUNDLED {
            let count = DeploymentParser::append_all(&mut set, yaml)
                .map_err(|e| RegistryError::Parse(format!("{name}: {e}")))?;
            tracing::debug!(file = name, descriptors = count, "loaded bundled deployments");
        }
        Ok(set)
    }

    /// Bundled tables followed by operator-supplied deployment files.
    /// Extension files are appended, so they can only add generations.
    pub fn with_extensions<P: AsRef<Path>>(paths: &[P]) -> Result<RegistrySet, RegistryError> {
        let mut set = Self::load_bundled()?;
        for path in paths {
            let count = DeploymentParser::append_file(&mut set, path.as_ref())?;
            tracing::info!(path = %path.as_ref().display(), descriptors = count, "loaded deployment extension");
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partykit_core::{ContractFamily, NetworkId};

    #[test]
    fn bundled_tables_parse() {
        let set = RegistrySet::bundled().unwrap();
        for family in ContractFamily::ALL {
            let registry = set.family(family).unwrap_or_else(|| panic!("{family} missing"));
            assert!(!registry.is_empty());
        }
    }

    #[test]
    fn bundled_tables_carry_no_addresses() {
        let set = RegistrySet::bundled().unwrap();
        for registry in set.families() {
            for network in NetworkId::ALL {
                assert_eq!(registry.addresses(network).count(), 0, "{} on {network}", registry.family());
            }
        }
    }

    #[test]
    fn listing_events_keep_top_level_names() {
        let set = RegistrySet::bundled().unwrap();
        let engine = set.descriptor("engine_v2").unwrap();
        for name in ["OpenseaOrderListed", "OpenseaAdvancedOrderListed"] {
            let event = engine.event(name).unwrap();
            assert_eq!(event.inputs[0].name, "orderParams");
            assert_eq!(event.inputs[0].ty, "tuple");
            let names: Vec<_> = event.inputs.iter().map(|p| p.name.as_str()).collect();
            for field in ["orderHash", "token", "tokenId", "expiry"] {
                assert!(names.contains(&field), "{name} lacks {field}");
            }
        }
        let party = set.descriptor("party_v3").unwrap();
        let initialized = party.event("PartyInitialized").unwrap();
        assert_eq!(initialized.inputs[1].name, "preciousTokens");
        assert_eq!(initialized.inputs[2].name, "preciousTokenIds");
    }

    #[test]
    fn party_descriptors_carry_governance_surface() {
        let set = RegistrySet::bundled().unwrap();
        let party = set.family(ContractFamily::Party).unwrap();
        for entry in party.entries() {
            for f in ["getProposalStateInfo", "getGovernanceValues", "propose", "execute", "accept"] {
                assert!(entry.descriptor.has_function(f), "{} lacks {f}", entry.descriptor);
            }
            assert!(entry.descriptor.has_event("ProposalExecuted"));
        }
    }

    #[test]
    fn advanced_listing_event_appears_from_engine_v2() {
        let set = RegistrySet::bundled().unwrap();
        assert!(!set.descriptor("engine_v1").unwrap().has_event("OpenseaAdvancedOrderListed"));
        assert!(set.descriptor("engine_v2").unwrap().has_event("OpenseaAdvancedOrderListed"));
        assert!(set.descriptor("engine_v3").unwrap().has_event("OpenseaOrderListed"));
    }

    #[test]
    fn extensions_append_after_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.yaml");
        std::fs::write(
            &path,
            "descriptor: party_v4\nfamily: party\nversion: \"4.0\"\nabi_from: party_v3\ndeployments:\n  zora: [\"0x00000000000000000000000000000000000000aa\"]\n",
        )
        .unwrap();
        let set = RegistrySet::with_extensions(&[&path]).unwrap();
        let party = set.family(ContractFamily::Party).unwrap();
        assert_eq!(party.entries().last().unwrap().descriptor.name, "party_v4");
        assert_eq!(set.len(), RegistrySet::bundled().unwrap().len() + 1);

        let found = set
            .lookup(ContractFamily::Party, alloy_primitives::Address::repeat_byte(0xaa), NetworkId::Zora)
            .unwrap();
        assert_eq!(found.name, "party_v4");
        assert!(found.has_event("PartyInitialized"));
    }
}
