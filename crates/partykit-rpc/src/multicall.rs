//! Multicall3 `aggregate3` batching.
//!
//! Every sub-call is sent with `allowFailure = true`, so one reverting call
//! never takes down its siblings.

use alloy_core::dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::{address, Address, Bytes};
use partykit_core::{selector, BatchItem, CallRequest, ChainError};

/// Multicall3 is deployed at the same address on every supported network.
pub const MULTICALL3_ADDRESS: Address = address!("cA11bde05977b3631167028862bE2a173976CA11");

const AGGREGATE3_SIGNATURE: &str = "aggregate3((address,bool,bytes)[])";

/// Calldata for `aggregate3(calls)`.
pub fn encode_aggregate3(requests: &[CallRequest]) -> Vec<u8> {
    let calls = requests
        .iter()
        .map(|r| {
            DynSolValue::Tuple(vec![
                DynSolValue::Address(r.to),
                DynSolValue::Bool(true),
                DynSolValue::Bytes(r.data.to_vec()),
            ])
        })
        .collect();

    let mut calldata = selector(AGGREGATE3_SIGNATURE).to_vec();
    calldata.extend(DynSolValue::Tuple(vec![DynSolValue::Array(calls)]).abi_encode_params());
    calldata
}

/// Decode the `(bool success, bytes returnData)[]` result into per-call outcomes.
///
/// A failed sub-call becomes `ChainError::Reverted` carrying its return data.
pub fn decode_aggregate3(data: &[u8], expected: usize) -> Result<Vec<BatchItem>, ChainError> {
    let ty = DynSolType::Array(Box::new(DynSolType::Tuple(vec![
        DynSolType::Bool,
        DynSolType::Bytes,
    ])));
    let invalid = |reason: String| ChainError::InvalidResponse { reason };

    let results = match ty.abi_decode(data).map_err(|e| invalid(format!("aggregate3: {e}")))? {
        DynSolValue::Array(items) => items,
        other => return Err(invalid(format!("aggregate3: unexpected {other:?}"))),
    };
    if results.len() != expected {
        return Err(invalid(format!(
            "aggregate3 returned {} results for {expected} calls",
            results.len()
        )));
    }

    results
        .into_iter()
        .map(|item| match item {
            DynSolValue::Tuple(fields) => match fields.as_slice() {
                [DynSolValue::Bool(true), DynSolValue::Bytes(ret)] => {
                    Ok(Ok(Bytes::copy_from_slice(ret)))
                }
                [DynSolValue::Bool(false), DynSolValue::Bytes(ret)] => {
                    Ok(Err(ChainError::Reverted { data: ret.clone() }))
                }
                _ => Err(invalid(format!("aggregate3: malformed result {fields:?}"))),
            },
            other => Err(invalid(format!("aggregate3: malformed result {other:?}"))),
        })
        .collect()
}
