//! Which proposal execution engine a party used at a given block.
//!
//! A party can upgrade its engine, and listing events changed shape between
//! engine generations, so receipts must be decoded with the descriptor that
//! was live when the transaction was mined.

use alloy_primitives::Address;
use partykit_core::{BlockTag, ChainReader, ContractFamily, PartyError};
use partykit_registry::{InterfaceDescriptor, RegistrySet};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::abi::{arg, as_address};
use crate::interface::ResolvedContract;

/// Engine descriptor per block, filled lazily from historical reads.
#[derive(Debug, Default)]
pub struct EngineHistory {
    by_block: BTreeMap<u64, (Address, Arc<InterfaceDescriptor>)>,
}

impl EngineHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a known engine at `block`.
    pub fn insert(&mut self, block: u64, engine: Address, descriptor: Arc<InterfaceDescriptor>) {
        self.by_block.insert(block, (engine, descriptor));
    }

    pub fn get(&self, block: u64) -> Option<&Arc<InterfaceDescriptor>> {
        self.by_block.get(&block).map(|(_, d)| d)
    }

    pub fn engine(&self, block: u64) -> Option<Address> {
        self.by_block.get(&block).map(|(a, _)| *a)
    }

    pub fn len(&self) -> usize {
        self.by_block.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_block.is_empty()
    }

    /// The engine descriptor `party` used at `block`, reading
    /// `getProposalExecutionEngine()` pinned to that block on a miss.
    pub async fn descriptor_at(
        &mut self,
        reader: &dyn ChainReader,
        registry: &RegistrySet,
        party: &ResolvedContract,
        block: u64,
    ) -> Result<Arc<InterfaceDescriptor>, PartyError> {
        if let Some(descriptor) = self.get(block) {
            return Ok(descriptor.clone());
        }

        let out = party
            .call(reader, "getProposalExecutionEngine", &[], BlockTag::Number(block))
            .await?;
        let engine = as_address(arg(&out, 0, "getProposalExecutionEngine")?)?;

        // Reuse the descriptor if this engine was already seen at another block.
        let known = self
            .by_block
            .values()
            .find(|(a, _)| *a == engine)
            .map(|(_, d)| d.clone());
        let descriptor = match known {
            Some(d) => d,
            None => registry
                .lookup(ContractFamily::ProposalExecutionEngine, engine, party.network)?
                .clone(),
        };

        tracing::debug!(party = %party.address, block, %engine, descriptor = %descriptor, "engine at block");
        self.insert(block, engine, descriptor.clone());
        Ok(descriptor)
    }
}
