//! Proposal decoder: `tag ++ payload` → typed variant.
//!
//! Decoding is strict. After the ABI decode the typed value is re-encoded and
//! compared byte for byte with the input, so trailing bytes, stray offsets,
//! dirty padding and out-of-range narrow integers are all rejected. Every
//! accepted payload therefore satisfies `encode(decode(b)) == b`.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::Bytes;
use partykit_core::CodecError;

use crate::encode::encode_payload;
use crate::schema::{payload_shape, payload_type, PayloadShape};
use crate::types::*;
use crate::value::{into_array, Fields};

/// Split raw `proposalData` into its tag and payload and decode it.
pub fn decode_proposal_data(data: &[u8]) -> Result<ProposalVariant, CodecError> {
    if data.len() < 4 {
        return Err(CodecError::Truncated { len: data.len() });
    }
    let tag = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
    decode(tag, &data[4..])
}

/// Decode `payload` according to the schema registered for `tag`.
///
/// Tag 0 and tags past the known range yield [`ProposalVariant::Invalid`]
/// with the payload carried through untouched.
pub fn decode(tag: u32, payload: &[u8]) -> Result<ProposalVariant, CodecError> {
    let ty = ProposalType::from_tag(tag);
    let (Some(schema), Some(shape)) = (payload_type(ty), payload_shape(ty)) else {
        return Ok(ProposalVariant::Invalid { tag, payload: Bytes::copy_from_slice(payload) });
    };
    let mismatch = |reason: String| CodecError::DecodeSchemaMismatch { tag, reason };

    let decoded = match shape {
        PayloadShape::Single => schema.abi_decode(payload),
        PayloadShape::Params => schema.abi_decode_params(payload),
    }
    .map_err(|e| mismatch(e.to_string()))?;

    let variant = from_value(ty, decoded).map_err(mismatch)?;

    let canonical = encode_payload(&variant).map_err(|e| mismatch(e.to_string()))?;
    if canonical != payload {
        return Err(mismatch(format!(
            "non-canonical encoding ({} bytes given, canonical form is {} bytes)",
            payload.len(),
            canonical.len()
        )));
    }
    Ok(variant)
}

fn from_value(ty: ProposalType, value: DynSolValue) -> Result<ProposalVariant, String> {
    let variant = match ty {
        ProposalType::Invalid => return Err("Invalid proposals carry no schema".into()),
        ProposalType::ListOnMarketplace => {
            let mut f = Fields::from_tuple(value)?;
            let v = ListOnMarketplace {
                list_price: f.uint("listPrice")?,
                duration: f.narrow_u64("duration", 40)?,
                token: f.address("token")?,
                token_id: f.uint("tokenId")?,
                fees: f.uint_array("fees")?,
                fee_recipients: f.address_array("feeRecipients")?,
                domain_hash_prefix: f.bytes4("domainHashPrefix")?,
            };
            f.finish()?;
            ProposalVariant::ListOnMarketplace(v)
        }
        ProposalType::ListOnAlternateMarketplace => {
            let mut f = Fields::from_tuple(value)?;
            let v = ListOnAlternateMarketplace {
                list_price: f.uint("listPrice")?,
                timeout: f.narrow_u64("timeout", 40)?,
                duration: f.narrow_u64("duration", 40)?,
                token: f.address("token")?,
                token_id: f.uint("tokenId")?,
            };
            f.finish()?;
            ProposalVariant::ListOnAlternateMarketplace(v)
        }
        ProposalType::Fractionalize => {
            let mut f = Fields::from_tuple(value)?;
            let v = Fractionalize {
                token: f.address("token")?,
                token_id: f.uint("tokenId")?,
                list_price: f.uint("listPrice")?,
            };
            f.finish()?;
            ProposalVariant::Fractionalize(v)
        }
        ProposalType::ArbitraryCalls => {
            let calls = into_array(value, "calls")?
                .into_iter()
                .map(|item| {
                    let mut f = Fields::from_tuple(item)?;
                    let call = ArbitraryCall {
                        target: f.address("target")?,
                        value: f.uint("value")?,
                        data: f.bytes("data")?.into(),
                        optional: f.bool("optional")?,
                        expected_result_hash: f.word("expectedResultHash")?,
                    };
                    f.finish()?;
                    Ok(call)
                })
                .collect::<Result<Vec<_>, String>>()?;
            ProposalVariant::ArbitraryCalls(ArbitraryCalls { calls })
        }
        ProposalType::UpgradeExecutionEngine => {
            let mut f = Fields::from_tuple(value)?;
            let v = UpgradeExecutionEngine {
                new_engine: f.address("newEngine")?,
                init_data: f.bytes("initData")?.into(),
            };
            f.finish()?;
            ProposalVariant::UpgradeExecutionEngine(v)
        }
        ProposalType::ListOnMarketplaceAdvanced => {
            let mut f = Fields::from_tuple(value)?;
            let start_price = f.uint("startPrice")?;
            let end_price = f.uint("endPrice")?;
            let duration = f.narrow_u64("duration", 40)?;
            let raw_type = f.u8("tokenType")?;
            let token_type = ListingTokenType::from_u8(raw_type)
                .ok_or_else(|| format!("'tokenType': unknown listing token type {raw_type}"))?;
            let v = ListOnMarketplaceAdvanced {
                start_price,
                end_price,
                duration,
                token_type,
                token: f.address("token")?,
                token_id: f.uint("tokenId")?,
                fees: f.uint_array("fees")?,
                fee_recipients: f.address_array("feeRecipients")?,
                conduit_key: f.word("conduitKey")?,
                zone: f.address("zone")?,
            };
            f.finish()?;
            ProposalVariant::ListOnMarketplaceAdvanced(v)
        }
        ProposalType::Distribute => {
            let mut f = Fields::from_tuple(value)?;
            let amount = f.uint("amount")?;
            let raw_type = f.u8("tokenType")?;
            let token_type = DistributionTokenType::from_u8(raw_type)
                .ok_or_else(|| format!("'tokenType': unknown distribution token type {raw_type}"))?;
            let v = Distribute {
                amount,
                token_type,
                token: f.address("token")?,
                token_id: f.uint("tokenId")?,
            };
            f.finish()?;
            ProposalVariant::Distribute(v)
        }
        ProposalType::AddAuthority => {
            let mut f = Fields::from_tuple(value)?;
            let v = AddAuthority {
                target: f.address("target")?,
                call_data: f.bytes("callData")?.into(),
            };
            f.finish()?;
            ProposalVariant::AddAuthority(v)
        }
        ProposalType::Operator => {
            let mut f = Fields::from_tuple(value)?;
            let v = Operator {
                allow_operators_to_spend_funds: f.bool("allowOperatorsToSpendFunds")?,
                operator: f.address("operator")?,
                operator_value: f.narrow_u128("operatorValue", 96)?,
                operator_data: f.bytes("operatorData")?.into(),
            };
            f.finish()?;
            ProposalVariant::Operator(v)
        }
    };
    Ok(variant)
}
