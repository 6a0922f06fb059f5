//! The `Proposal` struct as it appears in calldata and events.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::Bytes;
use partykit_core::CodecError;
use serde::{Deserialize, Serialize};

use crate::decode::decode_proposal_data;
use crate::encode::encode;
use crate::types::ProposalVariant;
use crate::value::{narrow, Fields};

/// `(uint40 maxExecutableTime, uint40 cancelDelay, bytes proposalData)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProposal {
    pub max_executable_time: u64,
    pub cancel_delay: u64,
    pub proposal_data: Bytes,
}

impl RawProposal {
    /// Wrap an encoded variant with its timing parameters.
    pub fn new(
        variant: &ProposalVariant,
        max_executable_time: u64,
        cancel_delay: u64,
    ) -> Result<Self, CodecError> {
        Ok(Self { max_executable_time, cancel_delay, proposal_data: encode(variant)? })
    }

    pub fn abi_type() -> DynSolType {
        DynSolType::Tuple(vec![DynSolType::Uint(40), DynSolType::Uint(40), DynSolType::Bytes])
    }

    pub fn to_dyn_value(&self) -> Result<DynSolValue, CodecError> {
        Ok(DynSolValue::Tuple(vec![
            narrow("maxExecutableTime", self.max_executable_time, 40)?,
            narrow("cancelDelay", self.cancel_delay, 40)?,
            DynSolValue::Bytes(self.proposal_data.to_vec()),
        ]))
    }

    /// Read a proposal out of a decoded event or call argument.
    pub fn from_dyn_value(value: DynSolValue) -> Result<Self, CodecError> {
        let mismatch = |reason: String| CodecError::DecodeSchemaMismatch { tag: 0, reason };
        let mut f = Fields::from_tuple(value).map_err(mismatch)?;
        let raw = Self {
            max_executable_time: f.narrow_u64("maxExecutableTime", 40).map_err(mismatch)?,
            cancel_delay: f.narrow_u64("cancelDelay", 40).map_err(mismatch)?,
            proposal_data: f.bytes("proposalData").map_err(mismatch)?.into(),
        };
        f.finish().map_err(mismatch)?;
        Ok(raw)
    }

    /// Decode `proposal_data` into its typed variant.
    pub fn variant(&self) -> Result<ProposalVariant, CodecError> {
        decode_proposal_data(&self.proposal_data)
    }
}
