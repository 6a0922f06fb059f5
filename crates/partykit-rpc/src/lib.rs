//! # partykit-rpc
//!
//! JSON-RPC plumbing for partykit: a minimal `RpcTransport` abstraction, an
//! HTTP transport on `reqwest`, and [`RpcChainReader`], which implements
//! `partykit_core::ChainReader` with Multicall3 batching.
//!
//! ```ignore
//! let reader = RpcChainReader::http(url, NetworkId::Base, HttpTransportConfig::default())?;
//! let code = reader.get_code(party, BlockTag::Latest).await?;
//! ```

pub mod error;
pub mod http;
pub mod multicall;
pub mod reader;
pub mod request;
pub mod transport;
pub mod types;

pub use error::TransportError;
pub use http::{HttpTransport, HttpTransportConfig};
pub use multicall::MULTICALL3_ADDRESS;
pub use reader::RpcChainReader;
pub use request::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, RpcId};
pub use transport::RpcTransport;
