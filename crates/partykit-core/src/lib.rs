//! # partykit-core
//!
//! Primitives shared by every partykit crate: network identifiers, contract
//! families, the read-only chain capability, proxy bytecode detection and
//! the error taxonomy.

pub mod address;
pub mod chain;
pub mod error;
pub mod family;
pub mod hash;
pub mod proxy;
pub mod reader;

pub use address::{address_topic, normalize_address, parse_address, u256_topic};
pub use chain::{NetworkId, UnknownNetwork};
pub use error::{ChainError, CodecError, PartyError, RegistryError};
pub use family::ContractFamily;
pub use hash::{event_topic, keccak256, selector};
pub use proxy::{detect_eip1167_clone, eip1167_runtime_code};
pub use reader::{BatchItem, BlockTag, CallRequest, ChainReader, Log, LogFilter, Receipt};
