//! Node response shapes for logs and receipts.

use alloy_primitives::{Address, Bytes, B256, U64};
use partykit_core::{Log, LogFilter, Receipt};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    /// `null` for pending logs.
    pub block_number: Option<U64>,
    pub transaction_hash: Option<B256>,
    pub log_index: Option<U64>,
    #[serde(default)]
    pub removed: bool,
}

impl From<RpcLog> for Log {
    fn from(raw: RpcLog) -> Self {
        Log {
            address: raw.address,
            topics: raw.topics,
            data: raw.data,
            block_number: raw.block_number.map(|n| n.to::<u64>()).unwrap_or_default(),
            transaction_hash: raw.transaction_hash.unwrap_or_default(),
            log_index: raw.log_index.map(|n| n.to::<u64>()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: B256,
    pub block_number: U64,
    /// `0x1` success, `0x0` failure. Absent on pre-Byzantium receipts.
    pub status: Option<U64>,
    pub logs: Vec<RpcLog>,
}

impl From<RpcReceipt> for Receipt {
    fn from(raw: RpcReceipt) -> Self {
        Receipt {
            transaction_hash: raw.transaction_hash,
            block_number: raw.block_number.to::<u64>(),
            status: raw.status.map(|s| s == U64::from(1)).unwrap_or(true),
            logs: raw.logs.into_iter().filter(|l| !l.removed).map(Log::from).collect(),
        }
    }
}

/// `eth_getLogs` filter object.
pub fn filter_param(filter: &LogFilter) -> Value {
    let topics: Vec<Value> = filter
        .topics
        .iter()
        .map(|t| match t {
            Some(topic) => json!(topic),
            None => Value::Null,
        })
        .collect();

    let mut obj = json!({
        "fromBlock": format!("0x{:x}", filter.from_block),
        "toBlock": filter.to_block.to_rpc_param(),
        "topics": topics,
    });
    if let Some(address) = filter.address {
        obj["address"] = json!(address);
    }
    obj
}
