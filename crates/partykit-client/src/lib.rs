//! # partykit-client
//!
//! Async orchestration over a [`ChainReader`](partykit_core::ChainReader):
//!
//! - resolve proxy instances to their implementation (`IMPL()` or EIP-1167 bytecode)
//! - bind an implementation to its interface descriptor
//! - read proposals, their state and the party's governance values
//! - find the marketplace order a listing proposal created
//! - build unsigned governance transactions
//!
//! ```ignore
//! let client = PartyClient::with_bundled_registry(reader)?;
//! let party = client.party(address).await?;
//! for record in client.proposals(&party).proposals().await? {
//!     let view = client.evaluate(&party, &record).await?;
//!     println!("{} {:?}", record.id, view.evaluation.display_status);
//! }
//! ```

pub mod abi;
pub mod actions;
pub mod client;
pub mod engine;
pub mod interface;
pub mod orders;
pub mod proposals;
pub mod resolver;

pub use actions::TxRequest;
pub use client::{PartyClient, ProposalView};
pub use engine::EngineHistory;
pub use interface::{resolve_interface, ResolvedContract};
pub use orders::{OrderResolver, SEAPORT_ADDRESS};
pub use proposals::{ProposalReader, ProposalRecord, ProposalState};
pub use resolver::{resolve, resolve_at, resolve_batch};
