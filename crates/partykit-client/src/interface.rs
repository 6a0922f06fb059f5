//! Binding a deployed address to the interface descriptor valid for it.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes};
use partykit_core::{BlockTag, CallRequest, ChainReader, ContractFamily, NetworkId, PartyError};
use partykit_registry::{InterfaceDescriptor, RegistrySet};
use std::sync::Arc;

use crate::abi;
use crate::resolver;

/// A deployed contract together with the descriptor its implementation maps to.
#[derive(Debug, Clone)]
pub struct ResolvedContract {
    pub address: Address,
    /// Logic address; equal to `address` for non-proxied singletons.
    pub implementation: Address,
    pub network: NetworkId,
    pub descriptor: Arc<InterfaceDescriptor>,
}

impl ResolvedContract {
    pub fn family(&self) -> ContractFamily {
        self.descriptor.family
    }

    /// Calldata for `function(args...)` as declared by this descriptor.
    pub fn calldata(&self, function: &str, args: &[DynSolValue]) -> Result<Bytes, PartyError> {
        abi::encode_call(self.descriptor.function(function)?, args)
    }

    pub fn call_request(&self, function: &str, args: &[DynSolValue]) -> Result<CallRequest, PartyError> {
        Ok(CallRequest::new(self.address, self.calldata(function, args)?))
    }

    /// Decode return data of `function`.
    pub fn decode_output(&self, function: &str, data: &[u8]) -> Result<Vec<DynSolValue>, PartyError> {
        abi::decode_output(self.descriptor.function(function)?, data)
    }

    /// Single read-only call, decoded.
    pub async fn call(
        &self,
        reader: &dyn ChainReader,
        function: &str,
        args: &[DynSolValue],
        block: BlockTag,
    ) -> Result<Vec<DynSolValue>, PartyError> {
        let request = self.call_request(function, args)?;
        let data = reader.call(&request, block).await?;
        self.decode_output(function, &data)
    }
}

/// Resolve the implementation behind `address` (for proxied families) and
/// look up its descriptor in `registry`.
pub async fn resolve_interface(
    reader: &dyn ChainReader,
    registry: &RegistrySet,
    family: ContractFamily,
    address: Address,
) -> Result<ResolvedContract, PartyError> {
    let network = reader.network();
    let implementation = if family.is_proxied() {
        resolver::resolve(reader, address).await?
    } else {
        address
    };
    let descriptor = registry.lookup(family, implementation, network)?.clone();
    tracing::debug!(
        %address,
        %implementation,
        %network,
        descriptor = %descriptor,
        "resolved interface"
    );
    Ok(ResolvedContract { address, implementation, network, descriptor })
}
