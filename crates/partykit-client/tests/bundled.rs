//! Logs shaped by the bundled interface tables, decoded end to end.

mod common;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use common::*;
use partykit_client::{OrderResolver, ProposalReader, ResolvedContract};
use partykit_core::{normalize_address, selector, u256_topic, ContractFamily, Log, NetworkId};
use partykit_lifecycle::OrderKind;
use partykit_registry::{DeploymentParser, InterfaceDescriptor, RegistrySet};
use std::sync::Arc;

const ID: u64 = 3;

/// Bundled interfaces with the test addresses bound through an extension table.
fn bundled_registry() -> RegistrySet {
    let mut set = RegistrySet::load_bundled().unwrap();
    let yaml = format!(
        "descriptor: party_v3_local\nfamily: party\nversion: \"3.0\"\nabi_from: party_v3\n\
         deployments:\n  base: [\"{}\"]\n---\n\
         descriptor: engine_v1_local\nfamily: proposal_execution_engine\nversion: \"1.0\"\nabi_from: engine_v1\n\
         deployments:\n  base: [\"{}\"]\n---\n\
         descriptor: engine_v3_local\nfamily: proposal_execution_engine\nversion: \"3.0\"\nabi_from: engine_v3\n\
         deployments:\n  base: [\"{}\"]\n",
        normalize_address(&PARTY_IMPL),
        normalize_address(&ENGINE_V1),
        normalize_address(&ENGINE_V2),
    );
    assert_eq!(DeploymentParser::append_all(&mut set, &yaml).unwrap(), 3);
    set
}

fn party(registry: &RegistrySet) -> ResolvedContract {
    ResolvedContract {
        address: PARTY,
        implementation: PARTY_IMPL,
        network: NetworkId::Base,
        descriptor: registry
            .lookup(ContractFamily::Party, PARTY_IMPL, NetworkId::Base)
            .unwrap()
            .clone(),
    }
}

fn engine(registry: &RegistrySet, name: &str) -> Arc<InterfaceDescriptor> {
    registry.descriptor(name).unwrap().clone()
}

fn address(b: u8) -> DynSolValue {
    DynSolValue::Address(Address::repeat_byte(b))
}

/// Seaport `OrderParameters` for a single NFT offered for ETH.
fn order_params() -> DynSolValue {
    let offer = DynSolValue::Tuple(vec![
        uint(2, 8),
        DynSolValue::Address(NFT),
        uint(42, 256),
        uint(1, 256),
        uint(1, 256),
    ]);
    let consideration = DynSolValue::Tuple(vec![
        uint(0, 8),
        DynSolValue::Address(Address::ZERO),
        uint(0, 256),
        uint(1_000, 256),
        uint(1_000, 256),
        DynSolValue::Address(PARTY),
    ]);
    DynSolValue::Tuple(vec![
        DynSolValue::Address(PARTY),
        address(0x20),
        DynSolValue::Array(vec![offer]),
        DynSolValue::Array(vec![consideration]),
        uint(2, 8),
        uint(100, 256),
        uint(5_000, 256),
        word(0x00),
        uint(7, 256),
        word(0x0c),
        uint(1, 256),
    ])
}

fn executed_log(registry: &RegistrySet, block: u64, hash: B256) -> Log {
    let d = party(registry).descriptor;
    event_log(
        PARTY,
        d.event("ProposalExecuted").unwrap(),
        vec![u256_topic(U256::from(ID))],
        vec![address(0xee), DynSolValue::Bytes(vec![])],
        block,
        hash,
        0,
    )
}

fn engine_call(registry: &RegistrySet) -> Vec<u8> {
    calldata(&party(registry).descriptor, "getProposalExecutionEngine", &[])
}

fn order_status_call(order: u8) -> Vec<u8> {
    let mut data = selector("getOrderStatus(bytes32)").to_vec();
    data.extend_from_slice(B256::repeat_byte(order).as_slice());
    data
}

fn order_status_ret(filled: u64) -> Vec<u8> {
    returns(vec![DynSolValue::Bool(true), DynSolValue::Bool(false), uint(filled, 256), uint(1, 256)])
}

fn one_execution(registry: &RegistrySet, engine: Address, listing: Log, order: u8) -> MockChain {
    let hash = listing.transaction_hash;
    let block = listing.block_number;
    MockChain::new()
        .with_log(executed_log(registry, block, hash))
        .with_receipt(receipt(hash, block, vec![executed_log(registry, block, hash), listing]))
        .on_call_at(PARTY, engine_call(registry), block, returns(vec![DynSolValue::Address(engine)]))
        .on_call(MARKETPLACE, order_status_call(order), order_status_ret(1))
}

#[tokio::test]
async fn standard_listing_decodes_with_bundled_engine_v1() {
    let registry = bundled_registry();
    let d = engine(&registry, "engine_v1_local");
    let listing = event_log(
        PARTY,
        d.event("OpenseaOrderListed").unwrap(),
        vec![],
        vec![order_params(), word(0x31), DynSolValue::Address(NFT), uint(42, 256), uint(1_000, 256), uint(5_000, 256)],
        100,
        tx(0xb1),
        4,
    );
    let chain = one_execution(&registry, ENGINE_V1, listing, 0x31);
    let party = party(&registry);

    let order = OrderResolver::new(&chain, &registry)
        .with_marketplace(MARKETPLACE)
        .resolve(&party, U256::from(ID))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.order_hash, B256::repeat_byte(0x31));
    assert_eq!(order.kind, OrderKind::Standard { list_price: U256::from(1_000u64) });
    assert_eq!(order.token, NFT);
    assert_eq!(order.token_id, U256::from(42u64));
    assert_eq!(order.expiry, U256::from(5_000u64));
    assert_eq!(order.block_number, 100);
    assert!(order.is_filled());
}

#[tokio::test]
async fn advanced_listing_decodes_with_bundled_engine_v3() {
    let registry = bundled_registry();
    let d = engine(&registry, "engine_v3_local");
    let listing = event_log(
        PARTY,
        d.event("OpenseaAdvancedOrderListed").unwrap(),
        vec![],
        vec![
            order_params(),
            word(0x32),
            DynSolValue::Address(NFT),
            uint(42, 256),
            uint(2_000, 256),
            uint(1_000, 256),
            uint(6_000, 256),
        ],
        200,
        tx(0xb2),
        4,
    );
    let chain = one_execution(&registry, ENGINE_V2, listing, 0x32);
    let party = party(&registry);

    let order = OrderResolver::new(&chain, &registry)
        .with_marketplace(MARKETPLACE)
        .resolve(&party, U256::from(ID))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.order_hash, B256::repeat_byte(0x32));
    assert_eq!(
        order.kind,
        OrderKind::Advanced { start_price: U256::from(2_000u64), end_price: U256::from(1_000u64) }
    );
    assert_eq!(order.expiry, U256::from(6_000u64));
    assert_eq!(order.transaction_hash, tx(0xb2));
}

#[tokio::test]
async fn precious_list_decodes_bundled_initialization() {
    let registry = bundled_registry();
    let party = party(&registry);
    let governance = DynSolValue::Tuple(vec![
        DynSolValue::Array(vec![address(0x01), address(0x02)]),
        uint(86_400, 40),
        uint(3_600, 40),
        uint(5_100, 16),
        uint(100, 96),
        uint(250, 16),
        address(0x03),
    ]);
    let opts = DynSolValue::Tuple(vec![
        governance,
        DynSolValue::String("Bundled".into()),
        DynSolValue::String("BNDL".into()),
        uint(1, 256),
    ]);
    let log = event_log(
        PARTY,
        party.descriptor.event("PartyInitialized").unwrap(),
        vec![],
        vec![
            opts,
            DynSolValue::Array(vec![DynSolValue::Address(NFT), DynSolValue::Address(NFT)]),
            DynSolValue::Array(vec![uint(42, 256), uint(43, 256)]),
        ],
        1,
        tx(0x01),
        0,
    );
    let chain = MockChain::new().with_log(log);

    let precious = ProposalReader::new(&chain, &party).precious_list().await.unwrap().unwrap();
    assert!(precious.contains(NFT, U256::from(42u64)));
    assert!(precious.contains(NFT, U256::from(43u64)));
    assert!(!precious.contains(NFT, U256::from(44u64)));
}
