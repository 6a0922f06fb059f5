//! Implementation resolver.
//!
//! Proxied instances (parties, crowdfunds) either expose a zero-argument
//! `IMPL()` accessor or are EIP-1167 minimal proxies. We try the accessor
//! first and fall back to reading the clone's bytecode.

use alloy_dyn_abi::DynSolType;
use alloy_primitives::{Address, Bytes};
use futures::future::join_all;
use partykit_core::{
    detect_eip1167_clone, selector, BlockTag, CallRequest, ChainReader, PartyError,
};

const IMPL_SIGNATURE: &str = "IMPL()";

fn impl_call(address: Address) -> CallRequest {
    CallRequest::new(address, selector(IMPL_SIGNATURE).to_vec())
}

/// Interpret `IMPL()` return data. A zero address or anything that is not a
/// single clean address word is treated as "no accessor".
fn parse_impl_return(data: &Bytes) -> Option<Address> {
    match DynSolType::Address.abi_decode(data) {
        Ok(value) => value.as_address().filter(|a| !a.is_zero()),
        Err(_) => None,
    }
}

async fn from_bytecode(
    reader: &dyn ChainReader,
    address: Address,
    block: BlockTag,
) -> Result<Option<Address>, PartyError> {
    let code = reader.get_code(address, block).await?;
    Ok(detect_eip1167_clone(&code))
}

/// Resolve the logic address behind `address`.
///
/// A revert from `IMPL()` falls through to the bytecode check; transport
/// failures propagate.
pub async fn resolve(reader: &dyn ChainReader, address: Address) -> Result<Address, PartyError> {
    resolve_at(reader, address, BlockTag::Latest).await
}

/// [`resolve`] pinned to a block.
pub async fn resolve_at(
    reader: &dyn ChainReader,
    address: Address,
    block: BlockTag,
) -> Result<Address, PartyError> {
    match reader.call(&impl_call(address), block).await {
        Ok(data) => {
            if let Some(implementation) = parse_impl_return(&data) {
                return Ok(implementation);
            }
        }
        Err(e) if e.is_revert() => {}
        Err(e) => return Err(e.into()),
    }

    tracing::debug!(%address, "IMPL() unavailable, checking minimal proxy bytecode");
    from_bytecode(reader, address, block)
        .await?
        .ok_or(PartyError::ImplementationNotFound { address })
}

/// Resolve many addresses with one batched `IMPL()` round trip.
///
/// The result is index-aligned with `addresses`; an unresolvable address is
/// `None`. Only a failure of the batch round trip itself is an error.
pub async fn resolve_batch(
    reader: &dyn ChainReader,
    addresses: &[Address],
) -> Result<Vec<Option<Address>>, PartyError> {
    let requests: Vec<CallRequest> = addresses.iter().copied().map(impl_call).collect();
    let items = reader.multicall(&requests, BlockTag::Latest).await?;
    if items.len() != addresses.len() {
        return Err(PartyError::Other(format!(
            "multicall returned {} results for {} addresses",
            items.len(),
            addresses.len()
        )));
    }

    let fallbacks = addresses.iter().zip(items).map(|(&address, item)| async move {
        if let Some(implementation) = item.ok().as_ref().and_then(parse_impl_return) {
            return Some(implementation);
        }
        match from_bytecode(reader, address, BlockTag::Latest).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(%address, error = %e, "bytecode fallback failed");
                None
            }
        }
    });
    let resolved = join_all(fallbacks).await;

    let misses = resolved.iter().filter(|r| r.is_none()).count();
    tracing::debug!(total = addresses.len(), misses, "resolved implementations");
    Ok(resolved)
}
