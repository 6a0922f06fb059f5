//! Error types shared by every partykit crate.

use alloy_primitives::Address;
use thiserror::Error;

use crate::chain::NetworkId;
use crate::family::ContractFamily;

/// Errors from the chain read capability.
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("call reverted: 0x{}", hex::encode(.data))]
    Reverted { data: Vec<u8> },

    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },

    #[error("{0}")]
    Other(String),
}

impl ChainError {
    /// Returns `true` if the node executed the call and it reverted.
    pub fn is_revert(&self) -> bool {
        matches!(self, Self::Reverted { .. })
    }
}

/// Errors from the proposal codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The payload does not match the tuple schema for its tag.
    #[error("proposal payload does not match schema for tag {tag}: {reason}")]
    DecodeSchemaMismatch { tag: u32, reason: String },

    #[error("proposal data is {len} bytes, shorter than the 4-byte tag")]
    Truncated { len: usize },

    #[error("value for '{field}' does not fit in uint{bits}")]
    ValueOutOfRange { field: &'static str, bits: usize },

    /// An `Invalid` proposal may only carry tag 0 or a tag past the known range.
    #[error("tag {tag} names a defined proposal type and cannot be encoded as Invalid")]
    InvalidTag { tag: u32 },
}

/// Errors from loading or extending the interface registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry parse error: {0}")]
    Parse(String),

    #[error("invalid address '{value}': {reason}")]
    InvalidAddress { value: String, reason: String },

    #[error("invalid ABI signature in {descriptor}: {reason}")]
    InvalidAbi { descriptor: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level error returned by the client operations.
#[derive(Debug, Error)]
pub enum PartyError {
    /// Neither the `IMPL()` accessor nor the minimal-proxy bytecode check succeeded.
    #[error("no implementation found behind {address}")]
    ImplementationNotFound { address: Address },

    /// The implementation resolved but is not listed in any descriptor for the network.
    #[error("no {family} interface registered for implementation {implementation} on {network}")]
    InterfaceNotFound {
        family: ContractFamily,
        network: NetworkId,
        implementation: Address,
    },

    /// The chain reported a proposal status outside 0..=7.
    #[error("unknown proposal status code {code}")]
    UnknownProposalStatus { code: u64 },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("function '{function}' not present in interface {descriptor}")]
    MissingFunction { descriptor: String, function: String },

    #[error("event '{event}' not present in interface {descriptor}")]
    MissingEvent { descriptor: String, event: String },

    #[error("ABI error: {reason}")]
    Abi { reason: String },

    #[error("{0}")]
    Other(String),
}

impl PartyError {
    pub fn abi(reason: impl Into<String>) -> Self {
        Self::Abi { reason: reason.into() }
    }
}
