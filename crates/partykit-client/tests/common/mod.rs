//! In-memory `ChainReader` and fixtures shared by the integration tests.

#![allow(dead_code)]

use alloy_dyn_abi::DynSolValue;
use alloy_json_abi::Event;
use alloy_primitives::{Address, Bytes, B256, U256};
use async_trait::async_trait;
use partykit_core::{
    BlockTag, CallRequest, ChainError, ChainReader, ContractFamily, Log, LogFilter, NetworkId,
    Receipt,
};
use partykit_registry::{InterfaceDescriptor, RegistryEntry, RegistrySet};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const PARTY: Address = Address::new([0x10; 20]);
pub const PARTY_IMPL: Address = Address::new([0x11; 20]);
pub const ENGINE_V1: Address = Address::new([0xe1; 20]);
pub const ENGINE_V2: Address = Address::new([0xe2; 20]);
pub const MARKETPLACE: Address = Address::new([0x5e; 20]);
pub const NFT: Address = Address::new([0x77; 20]);

/// Canned answers keyed by `(to, calldata)`, optionally pinned to a block.
/// Anything unanswered reverts with empty data.
#[derive(Default)]
pub struct MockChain {
    calls: HashMap<(Address, Vec<u8>), Result<Bytes, ChainError>>,
    pinned: HashMap<(Address, Vec<u8>, u64), Bytes>,
    code: HashMap<Address, Bytes>,
    logs: Vec<Log>,
    receipts: HashMap<B256, Receipt>,
    pub call_count: AtomicUsize,
    pub multicall_count: AtomicUsize,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_call(mut self, to: Address, data: impl Into<Vec<u8>>, ret: impl Into<Bytes>) -> Self {
        self.calls.insert((to, data.into()), Ok(ret.into()));
        self
    }

    pub fn on_call_at(
        mut self,
        to: Address,
        data: impl Into<Vec<u8>>,
        block: u64,
        ret: impl Into<Bytes>,
    ) -> Self {
        self.pinned.insert((to, data.into(), block), ret.into());
        self
    }

    pub fn failing_call(mut self, to: Address, data: impl Into<Vec<u8>>, err: ChainError) -> Self {
        self.calls.insert((to, data.into()), Err(err));
        self
    }

    pub fn with_code(mut self, address: Address, code: impl Into<Bytes>) -> Self {
        self.code.insert(address, code.into());
        self
    }

    pub fn with_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }

    pub fn with_receipt(mut self, receipt: Receipt) -> Self {
        self.receipts.insert(receipt.transaction_hash, receipt);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn multicalls(&self) -> usize {
        self.multicall_count.load(Ordering::SeqCst)
    }

    fn answer(&self, request: &CallRequest, block: BlockTag) -> Result<Bytes, ChainError> {
        let data = request.data.to_vec();
        if let BlockTag::Number(n) = block {
            if let Some(ret) = self.pinned.get(&(request.to, data.clone(), n)) {
                return Ok(ret.clone());
            }
        }
        self.calls
            .get(&(request.to, data))
            .cloned()
            .unwrap_or(Err(ChainError::Reverted { data: Vec::new() }))
    }
}

#[async_trait]
impl ChainReader for MockChain {
    fn network(&self) -> NetworkId {
        NetworkId::Base
    }

    async fn call(&self, request: &CallRequest, block: BlockTag) -> Result<Bytes, ChainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.answer(request, block)
    }

    async fn multicall(
        &self,
        requests: &[CallRequest],
        block: BlockTag,
    ) -> Result<Vec<Result<Bytes, ChainError>>, ChainError> {
        self.multicall_count.fetch_add(1, Ordering::SeqCst);
        Ok(requests.iter().map(|r| self.answer(r, block)).collect())
    }

    async fn get_code(&self, address: Address, _block: BlockTag) -> Result<Bytes, ChainError> {
        Ok(self.code.get(&address).cloned().unwrap_or_default())
    }

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ChainError> {
        Ok(self
            .logs
            .iter()
            .filter(|l| filter.matches(l) && l.block_number >= filter.from_block)
            .cloned()
            .collect())
    }

    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<Receipt>, ChainError> {
        Ok(self.receipts.get(&hash).cloned())
    }
}

const PARTY_ABI: &[&str] = &[
    "function IMPL() view returns (address)",
    "function getGovernanceValues() view returns ((uint40, uint40, uint16, uint96) gv)",
    "function getProposalExecutionEngine() view returns (address)",
    "function propose((uint40, uint40, bytes) proposal, uint256 latestSnapIndex) returns (uint256 proposalId)",
    "function accept(uint256 proposalId, uint256 snapIndex) returns (uint256 totalVotes)",
    "function veto(uint256 proposalId)",
    "function execute(uint256 proposalId, (uint40, uint40, bytes) proposal, address[] preciousTokens, uint256[] preciousTokenIds, bytes progressData, bytes extraData) payable",
    "function cancel(uint256 proposalId, (uint40, uint40, bytes) proposal)",
    "function getProposalStateInfo(uint256 proposalId) view returns (uint8 status, (uint40, uint40, uint40, uint40, uint96, uint96, uint8, uint8) values)",
    "event Proposed(uint256 proposalId, address proposer, (uint40, uint40, bytes) proposal)",
    "event ProposalExecuted(uint256 indexed proposalId, address executor, bytes nextProgressData)",
    "event PartyInitialized(((address[], uint40, uint40, uint16, uint96, uint16, address), string, string, uint256) opts, address[] preciousTokens, uint256[] preciousTokenIds)",
];

const ENGINE_V1_ABI: &[&str] = &[
    "event OpenseaOrderListed(bytes32 orderHash, address token, uint256 tokenId, uint256 listPrice, uint256 expiry)",
];

const ENGINE_V2_ABI: &[&str] = &[
    "event OpenseaOrderListed(bytes32 orderHash, address token, uint256 tokenId, uint256 listPrice, uint256 expiry)",
    "event OpenseaAdvancedOrderListed(bytes32 orderHash, address token, uint256 tokenId, uint256 startPrice, uint256 endPrice, uint256 expiry)",
];

fn entry(name: &str, family: ContractFamily, abi: &[&str], address: Address) -> RegistryEntry {
    let descriptor = InterfaceDescriptor::from_signatures(name, family, "1.0", abi.iter().copied())
        .expect("fixture abi parses");
    RegistryEntry::new(Arc::new(descriptor)).with_addresses(NetworkId::Base, [address])
}

/// One party generation and two engine generations on Base.
pub fn registry() -> RegistrySet {
    let mut set = RegistrySet::new();
    set.append(entry("party_test", ContractFamily::Party, PARTY_ABI, PARTY_IMPL)).unwrap();
    set.append(entry("engine_v1_test", ContractFamily::ProposalExecutionEngine, ENGINE_V1_ABI, ENGINE_V1))
        .unwrap();
    set.append(entry("engine_v2_test", ContractFamily::ProposalExecutionEngine, ENGINE_V2_ABI, ENGINE_V2))
        .unwrap();
    set
}

pub fn party_descriptor(registry: &RegistrySet) -> Arc<InterfaceDescriptor> {
    registry.descriptor("party_test").expect("fixture registered").clone()
}

/// Calldata for a zero-argument or simple call via the descriptor.
pub fn calldata(descriptor: &InterfaceDescriptor, function: &str, args: &[DynSolValue]) -> Vec<u8> {
    partykit_client::abi::encode_call(descriptor.function(function).unwrap(), args)
        .unwrap()
        .to_vec()
}

pub fn returns(values: Vec<DynSolValue>) -> Vec<u8> {
    DynSolValue::Tuple(values).abi_encode_params()
}

pub fn uint(v: u64, bits: usize) -> DynSolValue {
    DynSolValue::Uint(U256::from(v), bits)
}

pub fn word(b: u8) -> DynSolValue {
    DynSolValue::FixedBytes(B256::repeat_byte(b), 32)
}

/// Encode `event` from `emitter`: `indexed` become topics, `body` the data.
pub fn event_log(
    emitter: Address,
    event: &Event,
    indexed: Vec<B256>,
    body: Vec<DynSolValue>,
    block_number: u64,
    transaction_hash: B256,
    log_index: u64,
) -> Log {
    let mut topics = vec![event.selector()];
    topics.extend(indexed);
    Log {
        address: emitter,
        topics,
        data: DynSolValue::Tuple(body).abi_encode_params().into(),
        block_number,
        transaction_hash,
        log_index,
    }
}

pub fn receipt(transaction_hash: B256, block_number: u64, logs: Vec<Log>) -> Receipt {
    Receipt { transaction_hash, block_number, status: true, logs }
}

pub fn tx(n: u8) -> B256 {
    B256::repeat_byte(n)
}
