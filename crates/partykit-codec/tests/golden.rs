//! Wire-format integration tests.
//!
//! Every variant is encoded, decoded and re-encoded; a handful of payloads are
//! pinned to hand-assembled hex so a layout change cannot slip through as a
//! self-consistent round trip.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use partykit_codec::*;
use partykit_core::CodecError;

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn hex_to_bytes(s: &str) -> Vec<u8> {
    let s: String = s.split_whitespace().collect();
    let s = s.strip_prefix("0x").unwrap_or(&s).to_string();
    hex::decode(&s).unwrap_or_else(|e| panic!("bad hex '{s}': {e}"))
}

fn word_u64(v: u64) -> String {
    format!("{v:064x}")
}

fn word_addr(a: Address) -> String {
    format!("{:0>64}", hex::encode(a.as_slice()))
}

fn assert_round_trip(variant: ProposalVariant) {
    let encoded = encode(&variant).unwrap_or_else(|e| panic!("encode {variant:?}: {e}"));
    assert_eq!(
        u32::from_be_bytes(encoded[..4].try_into().unwrap()),
        variant.tag(),
        "tag prefix"
    );
    let decoded = decode_proposal_data(&encoded).unwrap_or_else(|e| panic!("decode: {e}"));
    assert_eq!(decoded, variant);
    assert_eq!(encode(&decoded).unwrap(), encoded);
}

fn all_variants() -> Vec<ProposalVariant> {
    let token = Address::repeat_byte(0xab);
    vec![
        ProposalVariant::ListOnMarketplace(ListOnMarketplace {
            list_price: U256::from(10u64).pow(U256::from(18u64)),
            duration: 7 * 24 * 3600,
            token,
            token_id: U256::from(1234u64),
            fees: vec![U256::from(250u64), U256::from(100u64)],
            fee_recipients: vec![Address::repeat_byte(0x01), Address::repeat_byte(0x02)],
            domain_hash_prefix: FixedBytes([0x36, 0x0c, 0x6e, 0xbe]),
        }),
        ProposalVariant::ListOnAlternateMarketplace(ListOnAlternateMarketplace {
            list_price: U256::from(5u64),
            timeout: 86_400,
            duration: 3_600,
            token,
            token_id: U256::from(7u64),
        }),
        ProposalVariant::Fractionalize(Fractionalize {
            token,
            token_id: U256::from(1u64),
            list_price: U256::from(42u64),
        }),
        ProposalVariant::ArbitraryCalls(ArbitraryCalls {
            calls: vec![
                ArbitraryCall {
                    target: Address::repeat_byte(0x10),
                    value: U256::ZERO,
                    data: Bytes::from(vec![0xa9, 0x05, 0x9c, 0xbb, 0x00]),
                    optional: false,
                    expected_result_hash: B256::ZERO,
                },
                ArbitraryCall {
                    target: Address::repeat_byte(0x11),
                    value: U256::from(1u64),
                    data: Bytes::new(),
                    optional: true,
                    expected_result_hash: B256::repeat_byte(0x5a),
                },
            ],
        }),
        ProposalVariant::ArbitraryCalls(ArbitraryCalls::default()),
        ProposalVariant::UpgradeExecutionEngine(UpgradeExecutionEngine {
            new_engine: Address::repeat_byte(0xe9),
            init_data: Bytes::from(vec![1, 2, 3]),
        }),
        ProposalVariant::ListOnMarketplaceAdvanced(ListOnMarketplaceAdvanced {
            start_price: U256::from(100u64),
            end_price: U256::from(50u64),
            duration: 1 << 39,
            token_type: ListingTokenType::Erc1155,
            token,
            token_id: U256::MAX,
            fees: vec![],
            fee_recipients: vec![],
            conduit_key: B256::repeat_byte(0xcc),
            zone: Address::repeat_byte(0x20),
        }),
        ProposalVariant::Distribute(Distribute::native(U256::from(1000u64))),
        ProposalVariant::Distribute(Distribute {
            amount: U256::from(9u64),
            token_type: DistributionTokenType::Erc1155,
            token,
            token_id: U256::from(3u64),
        }),
        ProposalVariant::AddAuthority(AddAuthority {
            target: Address::repeat_byte(0xaa),
            call_data: Bytes::from(vec![0xff; 40]),
        }),
        ProposalVariant::Operator(Operator {
            allow_operators_to_spend_funds: true,
            operator: Address::repeat_byte(0x0f),
            operator_value: (1u128 << 96) - 1,
            operator_data: Bytes::new(),
        }),
        ProposalVariant::Invalid { tag: 0, payload: Bytes::new() },
        ProposalVariant::Invalid { tag: 77, payload: Bytes::from(vec![9, 9, 9]) },
    ]
}

// ─── Round trips ──────────────────────────────────────────────────────────────

#[test]
fn every_variant_round_trips() {
    for variant in all_variants() {
        assert_round_trip(variant);
    }
}

#[test]
fn every_defined_tag_is_covered() {
    let tags: std::collections::BTreeSet<u32> = all_variants().iter().map(|v| v.tag()).collect();
    for tag in 0..=9 {
        assert!(tags.contains(&tag), "no fixture for tag {tag}");
    }
}

#[test]
fn tags_past_the_enum_decode_to_invalid() {
    for tag in [0u32, 10, 11, 1_000, u32::MAX] {
        let mut data = tag.to_be_bytes().to_vec();
        data.extend_from_slice(b"opaque");
        let v = decode_proposal_data(&data).unwrap();
        assert_eq!(v, ProposalVariant::Invalid { tag, payload: Bytes::from_static(b"opaque") });
        assert_eq!(v.proposal_type(), ProposalType::Invalid);
    }
}

#[test]
fn invalid_cannot_shadow_a_defined_tag() {
    for tag in 1..=9 {
        let v = ProposalVariant::Invalid { tag, payload: Bytes::new() };
        assert_eq!(encode(&v), Err(CodecError::InvalidTag { tag }));
    }
}

// ─── Golden payloads ─────────────────────────────────────────────────────────

#[test]
fn native_distribution_golden() {
    let expected = hex_to_bytes(&format!(
        "00000007 {} {} {} {}",
        word_u64(1000),
        word_u64(0),
        word_addr(ETH_SENTINEL),
        word_u64(0),
    ));

    let decoded = decode_proposal_data(&expected).unwrap();
    match &decoded {
        ProposalVariant::Distribute(d) => {
            assert_eq!(d.amount, U256::from(1000u64));
            assert_eq!(d.token_type, DistributionTokenType::Native);
            assert_eq!(d.token, ETH_SENTINEL);
        }
        other => panic!("expected Distribute, got {other:?}"),
    }
    assert_eq!(encode(&decoded).unwrap().as_ref(), expected.as_slice());
}

#[test]
fn engine_upgrade_is_a_bare_pair() {
    let engine = Address::repeat_byte(0x42);
    // (address, bytes) as parameters: address word, offset 0x40, length, data
    let expected = hex_to_bytes(&format!(
        "00000005 {} {} {} {}",
        word_addr(engine),
        word_u64(0x40),
        word_u64(2),
        format!("beef{}", "0".repeat(60)),
    ));
    let v = ProposalVariant::UpgradeExecutionEngine(UpgradeExecutionEngine {
        new_engine: engine,
        init_data: Bytes::from(vec![0xbe, 0xef]),
    });
    assert_eq!(encode(&v).unwrap().as_ref(), expected.as_slice());
    assert_eq!(decode_proposal_data(&expected).unwrap(), v);
}

#[test]
fn dynamic_struct_sits_behind_an_offset() {
    // abi.encode(AddAuthorityProposalData) with a dynamic member starts with 0x20
    let v = ProposalVariant::AddAuthority(AddAuthority {
        target: Address::repeat_byte(0x01),
        call_data: Bytes::new(),
    });
    let encoded = encode(&v).unwrap();
    let expected = hex_to_bytes(&format!(
        "00000008 {} {} {} {}",
        word_u64(0x20),
        word_addr(Address::repeat_byte(0x01)),
        word_u64(0x40),
        word_u64(0),
    ));
    assert_eq!(encoded.as_ref(), expected.as_slice());
}

// ─── Rejection ────────────────────────────────────────────────────────────────

#[test]
fn wrong_schema_for_tag_is_rejected() {
    // A Distribute payload relabelled as an AddAuthority proposal
    let mut data = encode(&ProposalVariant::Distribute(Distribute::native(U256::from(1u64))))
        .unwrap()
        .to_vec();
    data[3] = 8;
    let err = decode_proposal_data(&data).unwrap_err();
    assert!(matches!(err, CodecError::DecodeSchemaMismatch { tag: 8, .. }), "{err:?}");
}

#[test]
fn out_of_range_fields_fail_to_encode() {
    let v = ProposalVariant::Operator(Operator {
        allow_operators_to_spend_funds: false,
        operator: Address::ZERO,
        operator_value: 1u128 << 96,
        operator_data: Bytes::new(),
    });
    assert_eq!(
        encode(&v),
        Err(CodecError::ValueOutOfRange { field: "operatorValue", bits: 96 })
    );
}

// ─── Serialization ────────────────────────────────────────────────────────────

#[test]
fn json_output_is_tagged() {
    let v = ProposalVariant::Distribute(Distribute::native(U256::from(1000u64)));
    let json = serde_json::to_value(&v).unwrap();
    assert_eq!(json["type"], "distribute");
    assert_eq!(json["tokenType"], "native");
    let back: ProposalVariant = serde_json::from_value(json).unwrap();
    assert_eq!(back, v);
}

#[test]
fn annotation_reads_first_call_only() {
    let v = &all_variants()[3];
    // First call carries a transfer selector but a truncated argument list
    match v.annotation() {
        Some(CallAnnotation::TokenTransfer { recipient: None, amount: None, .. }) => {}
        other => panic!("unexpected annotation {other:?}"),
    }
    assert!(all_variants()[0].annotation().is_none());
}
