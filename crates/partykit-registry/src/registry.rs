//! Append-only interface registries.
//!
//! Each contract family owns an ordered list of `(descriptor, {network → [addresses]})`
//! entries. Lookup is a linear scan and the first entry whose address list
//! for the requested network contains the implementation wins. Entries are
//! only ever appended, so an address reused by two generations always
//! resolves to the older entry.

use alloy_primitives::Address;
use partykit_core::{ContractFamily, NetworkId, PartyError, RegistryError};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::descriptor::InterfaceDescriptor;

/// One historical deployment generation.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub descriptor: Arc<InterfaceDescriptor>,
    pub deployments: BTreeMap<NetworkId, Vec<Address>>,
}

impl RegistryEntry {
    pub fn new(descriptor: Arc<InterfaceDescriptor>) -> Self {
        Self { descriptor, deployments: BTreeMap::new() }
    }

    pub fn with_addresses(
        mut self,
        network: NetworkId,
        addresses: impl IntoIterator<Item = Address>,
    ) -> Self {
        self.deployments.entry(network).or_default().extend(addresses);
        self
    }

    /// `Address` equality is byte-wise, so this is case-insensitive on the hex form.
    pub fn contains(&self, network: NetworkId, address: Address) -> bool {
        self.deployments
            .get(&network)
            .map(|addrs| addrs.contains(&address))
            .unwrap_or(false)
    }
}

/// Ordered, append-only registry for a single contract family.
#[derive(Debug, Clone)]
pub struct FamilyRegistry {
    family: ContractFamily,
    entries: Vec<RegistryEntry>,
}

impl FamilyRegistry {
    pub fn new(family: ContractFamily) -> Self {
        Self { family, entries: Vec::new() }
    }

    pub fn family(&self) -> ContractFamily {
        self.family
    }

    /// Append a newly discovered deployment generation.
    pub fn append(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        if entry.descriptor.family != self.family {
            return Err(RegistryError::Parse(format!(
                "descriptor {} belongs to {}, not {}",
                entry.descriptor, entry.descriptor.family, self.family
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Resolve the descriptor for `implementation` on `network`. First match wins.
    pub fn lookup(
        &self,
        implementation: Address,
        network: NetworkId,
    ) -> Result<&Arc<InterfaceDescriptor>, PartyError> {
        self.entries
            .iter()
            .find(|entry| entry.contains(network, implementation))
            .map(|entry| &entry.descriptor)
            .ok_or(PartyError::InterfaceNotFound {
                family: self.family,
                network,
                implementation,
            })
    }

    /// Descriptor by name, e.g. for callers that already know the generation.
    pub fn descriptor(&self, name: &str) -> Option<&Arc<InterfaceDescriptor>> {
        self.entries
            .iter()
            .map(|e| &e.descriptor)
            .find(|d| d.name == name)
    }

    /// Every address registered for `network`, in registry order.
    pub fn addresses(&self, network: NetworkId) -> impl Iterator<Item = &Address> {
        self.entries
            .iter()
            .filter_map(move |e| e.deployments.get(&network))
            .flatten()
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One registry per contract family.
#[derive(Debug, Clone, Default)]
pub struct RegistrySet {
    families: BTreeMap<ContractFamily, FamilyRegistry>,
}

impl RegistrySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to its family's registry, creating the registry on first use.
    pub fn append(&mut self, entry: RegistryEntry) -> Result<(), RegistryError> {
        let family = entry.descriptor.family;
        self.families
            .entry(family)
            .or_insert_with(|| FamilyRegistry::new(family))
            .append(entry)
    }

    pub fn family(&self, family: ContractFamily) -> Option<&FamilyRegistry> {
        self.families.get(&family)
    }

    pub fn lookup(
        &self,
        family: ContractFamily,
        implementation: Address,
        network: NetworkId,
    ) -> Result<&Arc<InterfaceDescriptor>, PartyError> {
        match self.families.get(&family) {
            Some(registry) => registry.lookup(implementation, network),
            None => Err(PartyError::InterfaceNotFound { family, network, implementation }),
        }
    }

    /// Find a descriptor by name across all families.
    pub fn descriptor(&self, name: &str) -> Option<&Arc<InterfaceDescriptor>> {
        self.families.values().find_map(|r| r.descriptor(name))
    }

    pub fn families(&self) -> impl Iterator<Item = &FamilyRegistry> {
        self.families.values()
    }

    /// Total number of entries across every family.
    pub fn len(&self) -> usize {
        self.families.values().map(FamilyRegistry::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
