//! `ChainReader` over a JSON-RPC transport.

use alloy_primitives::{Address, Bytes, B256};
use async_trait::async_trait;
use partykit_core::{
    BatchItem, BlockTag, CallRequest, ChainError, ChainReader, Log, LogFilter, NetworkId, Receipt,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpTransport, HttpTransportConfig};
use crate::multicall::{decode_aggregate3, encode_aggregate3, MULTICALL3_ADDRESS};
use crate::transport::RpcTransport;
use crate::types::{filter_param, RpcLog, RpcReceipt};

pub struct RpcChainReader {
    transport: Arc<dyn RpcTransport>,
    network: NetworkId,
    multicall: Address,
    next_id: AtomicU64,
}

impl RpcChainReader {
    pub fn new(transport: Arc<dyn RpcTransport>, network: NetworkId) -> Self {
        Self { transport, network, multicall: MULTICALL3_ADDRESS, next_id: AtomicU64::new(1) }
    }

    /// Reader over HTTP with the given request timeout.
    pub fn http(
        url: impl Into<String>,
        network: NetworkId,
        config: HttpTransportConfig,
    ) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(HttpTransport::new(url, config)?), network))
    }

    /// Use a Multicall3 deployment other than the canonical one.
    pub fn with_multicall(mut self, address: Address) -> Self {
        self.multicall = address;
        self
    }

    pub fn url(&self) -> &str {
        self.transport.url()
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let value = self.transport.request(id, method, params).await?;
        serde_json::from_value(value).map_err(|e| ChainError::InvalidResponse {
            reason: format!("{method}: {e}"),
        })
    }
}

fn call_object(request: &CallRequest) -> Value {
    json!({ "to": request.to, "data": request.data })
}

#[async_trait]
impl ChainReader for RpcChainReader {
    fn network(&self) -> NetworkId {
        self.network
    }

    async fn call(&self, request: &CallRequest, block: BlockTag) -> Result<Bytes, ChainError> {
        self.request("eth_call", vec![call_object(request), json!(block.to_rpc_param())]).await
    }

    /// One `eth_call` to Multicall3 `aggregate3`. Per-call failures land in
    /// their own slot; only a failure of the aggregate call itself is returned
    /// as the outer error.
    async fn multicall(
        &self,
        requests: &[CallRequest],
        block: BlockTag,
    ) -> Result<Vec<BatchItem>, ChainError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }
        let aggregate = CallRequest::new(self.multicall, encode_aggregate3(requests));
        let data = self.call(&aggregate, block).await?;
        tracing::debug!(calls = requests.len(), network = %self.network, "multicall");
        decode_aggregate3(&data, requests.len())
    }

    async fn get_code(&self, address: Address, block: BlockTag) -> Result<Bytes, ChainError> {
        self.request("eth_getCode", vec![json!(address), json!(block.to_rpc_param())]).await
    }

    async fn get_logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ChainError> {
        let logs: Vec<RpcLog> = self.request("eth_getLogs", vec![filter_param(filter)]).await?;
        Ok(logs.into_iter().filter(|l| !l.removed).map(Log::from).collect())
    }

    async fn get_transaction_receipt(&self, hash: B256) -> Result<Option<Receipt>, ChainError> {
        let receipt: Option<RpcReceipt> =
            self.request("eth_getTransactionReceipt", vec![json!(hash)]).await?;
        Ok(receipt.map(Receipt::from))
    }
}
