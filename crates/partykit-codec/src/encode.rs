//! Proposal encoder: typed variant → `tag ++ payload`.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::Bytes;
use partykit_core::CodecError;

use crate::types::{ArbitraryCall, ProposalType, ProposalVariant};
use crate::value::{address_array, bytes4, narrow, narrow_u128, uint256, uint_array, word};

/// Encode a proposal into the exact bytes a Party contract expects as
/// `proposalData`: the 4-byte big-endian tag followed by the ABI payload.
pub fn encode(variant: &ProposalVariant) -> Result<Bytes, CodecError> {
    let payload = encode_payload(variant)?;
    let mut out = Vec::with_capacity(4 + payload.len());
    out.extend_from_slice(&variant.tag().to_be_bytes());
    out.extend_from_slice(&payload);
    Ok(out.into())
}

/// Encode only the payload that follows the tag.
pub fn encode_payload(variant: &ProposalVariant) -> Result<Vec<u8>, CodecError> {
    let value = match variant {
        ProposalVariant::Invalid { tag, payload } => {
            if ProposalType::from_tag(*tag) != ProposalType::Invalid {
                return Err(CodecError::InvalidTag { tag: *tag });
            }
            return Ok(payload.to_vec());
        }
        // Bare `abi.encode(address, bytes)`, not a tuple
        ProposalVariant::UpgradeExecutionEngine(p) => {
            return Ok(DynSolValue::Tuple(vec![
                DynSolValue::Address(p.new_engine),
                DynSolValue::Bytes(p.init_data.to_vec()),
            ])
            .abi_encode_params());
        }
        ProposalVariant::ListOnMarketplace(p) => DynSolValue::Tuple(vec![
            uint256(p.list_price),
            narrow("duration", p.duration, 40)?,
            DynSolValue::Address(p.token),
            uint256(p.token_id),
            uint_array(&p.fees),
            address_array(&p.fee_recipients),
            bytes4(p.domain_hash_prefix),
        ]),
        ProposalVariant::ListOnAlternateMarketplace(p) => DynSolValue::Tuple(vec![
            uint256(p.list_price),
            narrow("timeout", p.timeout, 40)?,
            narrow("duration", p.duration, 40)?,
            DynSolValue::Address(p.token),
            uint256(p.token_id),
        ]),
        ProposalVariant::Fractionalize(p) => DynSolValue::Tuple(vec![
            DynSolValue::Address(p.token),
            uint256(p.token_id),
            uint256(p.list_price),
        ]),
        ProposalVariant::ArbitraryCalls(p) => {
            DynSolValue::Array(p.calls.iter().map(arbitrary_call).collect())
        }
        ProposalVariant::ListOnMarketplaceAdvanced(p) => DynSolValue::Tuple(vec![
            uint256(p.start_price),
            uint256(p.end_price),
            narrow("duration", p.duration, 40)?,
            narrow("tokenType", p.token_type as u64, 8)?,
            DynSolValue::Address(p.token),
            uint256(p.token_id),
            uint_array(&p.fees),
            address_array(&p.fee_recipients),
            word(p.conduit_key),
            DynSolValue::Address(p.zone),
        ]),
        ProposalVariant::Distribute(p) => DynSolValue::Tuple(vec![
            uint256(p.amount),
            narrow("tokenType", p.token_type as u64, 8)?,
            DynSolValue::Address(p.token),
            uint256(p.token_id),
        ]),
        ProposalVariant::AddAuthority(p) => DynSolValue::Tuple(vec![
            DynSolValue::Address(p.target),
            DynSolValue::Bytes(p.call_data.to_vec()),
        ]),
        ProposalVariant::Operator(p) => DynSolValue::Tuple(vec![
            DynSolValue::Bool(p.allow_operators_to_spend_funds),
            DynSolValue::Address(p.operator),
            narrow_u128("operatorValue", p.operator_value, 96)?,
            DynSolValue::Bytes(p.operator_data.to_vec()),
        ]),
    };
    Ok(value.abi_encode())
}

fn arbitrary_call(call: &ArbitraryCall) -> DynSolValue {
    DynSolValue::Tuple(vec![
        DynSolValue::Address(call.target),
        uint256(call.value),
        DynSolValue::Bytes(call.data.to_vec()),
        DynSolValue::Bool(call.optional),
        word(call.expected_result_hash),
    ])
}
