//! The `ChainReader` trait: the read-only chain capability partykit consumes.
//!
//! partykit never signs, broadcasts, retries or times out on its own. A
//! concrete reader (see `partykit-rpc`) owns the transport; everything here is
//! plain data plus the trait.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::chain::NetworkId;
use crate::error::ChainError;

/// Which block a read is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTag {
    #[default]
    Latest,
    Number(u64),
}

impl BlockTag {
    /// JSON-RPC block parameter (`"latest"` or a hex quantity).
    pub fn to_rpc_param(self) -> String {
        match self {
            BlockTag::Latest => "latest".to_string(),
            BlockTag::Number(n) => format!("0x{n:x}"),
        }
    }
}

/// A read-only contract call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub to: Address,
    pub data: Bytes,
}

impl CallRequest {
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self { to, data: data.into() }
    }
}

/// Filter for historical event-log queries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogFilter {
    pub address: Option<Address>,
    /// Positional topic filters; `None` matches anything in that position.
    pub topics: Vec<Option<B256>>,
    pub from_block: u64,
    pub to_block: BlockTag,
}

impl LogFilter {
    pub fn new(address: Address) -> Self {
        Self { address: Some(address), ..Default::default() }
    }

    pub fn event(mut self, topic0: B256) -> Self {
        self.set_topic(0, topic0);
        self
    }

    /// Filter on an indexed argument (`position` 1..=3).
    pub fn topic(mut self, position: usize, value: B256) -> Self {
        self.set_topic(position, value);
        self
    }

    pub fn from_block(mut self, block: u64) -> Self {
        self.from_block = block;
        self
    }

    fn set_topic(&mut self, position: usize, value: B256) {
        if self.topics.len() <= position {
            self.topics.resize(position + 1, None);
        }
        self.topics[position] = Some(value);
    }

    /// Returns `true` if `log` satisfies this filter (ignoring block range).
    pub fn matches(&self, log: &Log) -> bool {
        if let Some(address) = self.address {
            if log.address != address {
                return false;
            }
        }
        self.topics.iter().enumerate().all(|(i, wanted)| match wanted {
            None => true,
            Some(t) => log.topics.get(i) == Some(t),
        })
    }
}

/// A decoded-enough EVM log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    pub block_number: u64,
    pub transaction_hash: B256,
    pub log_index: u64,
}

impl Log {
    pub fn topic0(&self) -> Option<&B256> {
        self.topics.first()
    }
}

/// A transaction receipt, reduced to what proposal cross-referencing needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub transaction_hash: B256,
    pub block_number: u64,
    pub status: bool,
    pub logs: Vec<Log>,
}

/// Per-item outcome of a batched read.
pub type BatchItem = Result<Bytes, ChainError>;

/// Read-only access to an EVM chain.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the trait is object-safe and is
/// normally held as `Arc<dyn ChainReader>`.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// The network this reader is connected to.
    fn network(&self) -> NetworkId;

    /// Single `eth_call`. Fails fast.
    async fn call(&self, request: &CallRequest, block: BlockTag) -> Result<Bytes, ChainError>;

    /// Aggregated reads. The outer `Result` only fails if the round trip
    /// itself failed; each item carries its own outcome and results are
    /// index-aligned with `requests`.
    ///
    /// Default implementation issues the calls one by one; override for
    /// true single-round-trip batching.
    async fn multicall(
        &self,
        requests: &[CallRequest],
        block: BlockTag,
    ) -> Result<Vec<BatchItem>, ChainError> {
        let mut out = Vec::with_capacity(requests.len());
        for request in requests {
            out.push(self.call(request, block).await);
        }
        Ok(out)
    }

    /// Runtime bytecode at `address`.
    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, ChainError>;

    /// Historical logs matching `filter`, in chain order.
    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ChainError>;

    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<Receipt>, ChainError>;
}
