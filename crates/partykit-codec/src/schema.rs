//! ABI payload schemas, one per proposal tag.

use alloy_core::dyn_abi::DynSolType;

use crate::types::ProposalType;

/// How the payload after the tag was produced on chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `abi.encode(value)`: one value, dynamic tuples behind an offset word.
    Single,
    /// `abi.encode(a, b, ...)`: a bare parameter sequence.
    Params,
}

/// Human-readable type of each payload, for CLI output and docs.
pub fn schema_signature(ty: ProposalType) -> Option<&'static str> {
    Some(match ty {
        ProposalType::Invalid => return None,
        ProposalType::ListOnMarketplace => {
            "(uint256,uint40,address,uint256,uint256[],address[],bytes4)"
        }
        ProposalType::ListOnAlternateMarketplace => "(uint256,uint40,uint40,address,uint256)",
        ProposalType::Fractionalize => "(address,uint256,uint256)",
        ProposalType::ArbitraryCalls => "(address,uint256,bytes,bool,bytes32)[]",
        ProposalType::UpgradeExecutionEngine => "(address,bytes)",
        ProposalType::ListOnMarketplaceAdvanced => {
            "(uint256,uint256,uint40,uint8,address,uint256,uint256[],address[],bytes32,address)"
        }
        ProposalType::Distribute => "(uint256,uint8,address,uint256)",
        ProposalType::AddAuthority => "(address,bytes)",
        ProposalType::Operator => "(bool,address,uint96,bytes)",
    })
}

/// Payload layout for `ty`. `Invalid` has none.
pub fn payload_shape(ty: ProposalType) -> Option<PayloadShape> {
    match ty {
        ProposalType::Invalid => None,
        ProposalType::UpgradeExecutionEngine => Some(PayloadShape::Params),
        _ => Some(PayloadShape::Single),
    }
}

/// The `DynSolType` describing the payload of `ty`.
pub fn payload_type(ty: ProposalType) -> Option<DynSolType> {
    use DynSolType::{Address, Array, Bool, Bytes, FixedBytes, Tuple, Uint};

    let uint_array = || Array(Box::new(Uint(256)));
    let address_array = || Array(Box::new(Address));

    Some(match ty {
        ProposalType::Invalid => return None,
        ProposalType::ListOnMarketplace => Tuple(vec![
            Uint(256),
            Uint(40),
            Address,
            Uint(256),
            uint_array(),
            address_array(),
            FixedBytes(4),
        ]),
        ProposalType::ListOnAlternateMarketplace => {
            Tuple(vec![Uint(256), Uint(40), Uint(40), Address, Uint(256)])
        }
        ProposalType::Fractionalize => Tuple(vec![Address, Uint(256), Uint(256)]),
        ProposalType::ArbitraryCalls => Array(Box::new(arbitrary_call_type())),
        ProposalType::UpgradeExecutionEngine => Tuple(vec![Address, Bytes]),
        ProposalType::ListOnMarketplaceAdvanced => Tuple(vec![
            Uint(256),
            Uint(256),
            Uint(40),
            Uint(8),
            Address,
            Uint(256),
            uint_array(),
            address_array(),
            FixedBytes(32),
            Address,
        ]),
        ProposalType::Distribute => Tuple(vec![Uint(256), Uint(8), Address, Uint(256)]),
        ProposalType::AddAuthority => Tuple(vec![Address, Bytes]),
        ProposalType::Operator => Tuple(vec![Bool, Address, Uint(96), Bytes]),
    })
}

pub(crate) fn arbitrary_call_type() -> DynSolType {
    DynSolType::Tuple(vec![
        DynSolType::Address,
        DynSolType::Uint(256),
        DynSolType::Bytes,
        DynSolType::Bool,
        DynSolType::FixedBytes(32),
    ])
}
