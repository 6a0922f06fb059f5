//! Best-effort annotation of arbitrary-call proposals.
//!
//! Only the first call is inspected. Its calldata selector identifies a plain
//! token transfer; argument words are parsed when present and left `None`
//! when the calldata is too short.

use alloy_primitives::{Address, U256};
use serde::Serialize;

use crate::types::{ArbitraryCalls, ProposalVariant};

/// ERC-20 `transfer(address,uint256)`.
pub const ERC20_TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
/// ERC-721 `transferFrom(address,address,uint256)`.
pub const ERC721_TRANSFER_FROM_SELECTOR: [u8; 4] = [0x23, 0xb8, 0x72, 0xdd];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CallAnnotation {
    TokenTransfer {
        token: Address,
        recipient: Option<Address>,
        amount: Option<U256>,
    },
    NftTransfer {
        token: Address,
        from: Option<Address>,
        to: Option<Address>,
        token_id: Option<U256>,
    },
}

/// Annotate the first call of an arbitrary-call proposal.
pub fn annotate(calls: &ArbitraryCalls) -> Option<CallAnnotation> {
    let first = calls.calls.first()?;
    let data = first.data.as_ref();
    let selector: [u8; 4] = data.get(..4)?.try_into().ok()?;
    let args = &data[4..];

    match selector {
        ERC20_TRANSFER_SELECTOR => Some(CallAnnotation::TokenTransfer {
            token: first.target,
            recipient: arg_address(args, 0),
            amount: arg_uint(args, 1),
        }),
        ERC721_TRANSFER_FROM_SELECTOR => Some(CallAnnotation::NftTransfer {
            token: first.target,
            from: arg_address(args, 0),
            to: arg_address(args, 1),
            token_id: arg_uint(args, 2),
        }),
        _ => None,
    }
}

impl ProposalVariant {
    /// Annotation for `ArbitraryCalls`; `None` for every other variant.
    pub fn annotation(&self) -> Option<CallAnnotation> {
        match self {
            ProposalVariant::ArbitraryCalls(calls) => annotate(calls),
            _ => None,
        }
    }
}

fn arg_word(args: &[u8], index: usize) -> Option<&[u8]> {
    args.get(index * 32..(index + 1) * 32)
}

fn arg_address(args: &[u8], index: usize) -> Option<Address> {
    arg_word(args, index).map(|w| Address::from_slice(&w[12..]))
}

fn arg_uint(args: &[u8], index: usize) -> Option<U256> {
    arg_word(args, index).map(U256::from_be_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArbitraryCall;
    use alloy_primitives::{Bytes, B256};

    fn word_address(a: Address) -> [u8; 32] {
        a.into_word().0
    }

    fn word_uint(v: u64) -> [u8; 32] {
        U256::from(v).to_be_bytes()
    }

    fn calls(target: Address, data: Vec<u8>) -> ArbitraryCalls {
        ArbitraryCalls {
            calls: vec![ArbitraryCall {
                target,
                value: U256::ZERO,
                data: Bytes::from(data),
                optional: false,
                expected_result_hash: B256::ZERO,
            }],
        }
    }

    #[test]
    fn erc20_transfer() {
        let token = Address::repeat_byte(0x20);
        let to = Address::repeat_byte(0x33);
        let mut data = ERC20_TRANSFER_SELECTOR.to_vec();
        data.extend(word_address(to));
        data.extend(word_uint(1_000));

        assert_eq!(
            annotate(&calls(token, data)),
            Some(CallAnnotation::TokenTransfer {
                token,
                recipient: Some(to),
                amount: Some(U256::from(1_000u64)),
            })
        );
    }

    #[test]
    fn erc721_transfer_from() {
        let nft = Address::repeat_byte(0x72);
        let from = Address::repeat_byte(0x01);
        let to = Address::repeat_byte(0x02);
        let mut data = ERC721_TRANSFER_FROM_SELECTOR.to_vec();
        data.extend(word_address(from));
        data.extend(word_address(to));
        data.extend(word_uint(9));

        assert_eq!(
            annotate(&calls(nft, data)),
            Some(CallAnnotation::NftTransfer {
                token: nft,
                from: Some(from),
                to: Some(to),
                token_id: Some(U256::from(9u64)),
            })
        );
    }

    #[test]
    fn short_arguments_are_none() {
        let token = Address::repeat_byte(0x20);
        let mut data = ERC20_TRANSFER_SELECTOR.to_vec();
        data.extend(word_address(Address::repeat_byte(0x33)));
        let annotation = annotate(&calls(token, data)).unwrap();
        assert!(matches!(annotation, CallAnnotation::TokenTransfer { amount: None, recipient: Some(_), .. }));
    }

    #[test]
    fn unrelated_or_empty_calls_have_no_annotation() {
        assert!(annotate(&ArbitraryCalls::default()).is_none());
        assert!(annotate(&calls(Address::ZERO, vec![0x12, 0x34, 0x56, 0x78])).is_none());
        assert!(annotate(&calls(Address::ZERO, vec![0xa9, 0x05])).is_none());
    }
}
