//! # partykit-codec
//!
//! The Party proposal wire format.
//!
//! `proposalData` is a 4-byte big-endian proposal-type tag followed by the
//! ABI encoding of that type's payload struct. This crate maps it to and
//! from the closed [`ProposalVariant`] sum type.
//!
//! ```ignore
//! let variant = partykit_codec::decode_proposal_data(&raw.proposal_data)?;
//! let again = partykit_codec::encode(&variant)?;
//! assert_eq!(again, raw.proposal_data);
//! ```

pub mod annotate;
pub mod batch;
pub mod decode;
pub mod encode;
pub mod raw;
pub mod schema;
pub mod types;
mod value;

pub use annotate::{annotate, CallAnnotation};
pub use batch::{decode_batch, decode_batch_partitioned};
pub use decode::{decode, decode_proposal_data};
pub use encode::{encode, encode_payload};
pub use raw::RawProposal;
pub use schema::{payload_type, schema_signature};
pub use types::*;
