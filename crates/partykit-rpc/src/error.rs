//! Transport-level error types.

use partykit_core::ChainError;
use thiserror::Error;

use crate::request::JsonRpcError;

#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed (connection refused, non-2xx status, etc.).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON-RPC protocol-level error returned by the node.
    #[error("RPC error {}: {}", .0.code, .0.message)]
    Rpc(JsonRpcError),

    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    #[error("deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl From<TransportError> for ChainError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Rpc(rpc) if rpc.is_revert() => {
                ChainError::Reverted { data: rpc.revert_data() }
            }
            TransportError::Deserialization(e) => {
                ChainError::InvalidResponse { reason: e.to_string() }
            }
            other => ChainError::Transport(other.to_string()),
        }
    }
}
