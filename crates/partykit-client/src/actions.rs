//! Unsigned governance transactions.
//!
//! Calldata is encoded from the party's own descriptor, so the builders stay
//! correct across deployment generations. Signing and broadcasting are left
//! to the caller.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, Bytes, U256};
use partykit_codec::RawProposal;
use partykit_core::PartyError;
use partykit_lifecycle::PreciousList;
use serde::{Deserialize, Serialize};

use crate::interface::ResolvedContract;

/// A transaction ready for an external signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxRequest {
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl TxRequest {
    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }
}

fn build(party: &ResolvedContract, function: &str, args: &[DynSolValue]) -> Result<TxRequest, PartyError> {
    Ok(TxRequest { to: party.address, data: party.calldata(function, args)?, value: U256::ZERO })
}

fn uint256(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

/// `propose(proposal, latestSnapIndex)`.
pub fn propose(
    party: &ResolvedContract,
    proposal: &RawProposal,
    latest_snap_index: U256,
) -> Result<TxRequest, PartyError> {
    build(party, "propose", &[proposal.to_dyn_value()?, uint256(latest_snap_index)])
}

/// `accept(proposalId, snapIndex)`.
pub fn accept(party: &ResolvedContract, proposal_id: U256, snap_index: U256) -> Result<TxRequest, PartyError> {
    build(party, "accept", &[uint256(proposal_id), uint256(snap_index)])
}

/// `veto(proposalId)`. Host only.
pub fn veto(party: &ResolvedContract, proposal_id: U256) -> Result<TxRequest, PartyError> {
    build(party, "veto", &[uint256(proposal_id)])
}

/// `execute(proposalId, proposal, preciousTokens, preciousTokenIds, progressData, extraData)`.
///
/// `progress_data` is empty on the first step and the `nextProgressData`
/// of the previous `ProposalExecuted` event afterwards.
pub fn execute(
    party: &ResolvedContract,
    proposal_id: U256,
    proposal: &RawProposal,
    precious: &PreciousList,
    progress_data: Bytes,
    extra_data: Bytes,
) -> Result<TxRequest, PartyError> {
    let (tokens, token_ids) = precious.to_parallel();
    build(
        party,
        "execute",
        &[
            uint256(proposal_id),
            proposal.to_dyn_value()?,
            DynSolValue::Array(tokens.into_iter().map(DynSolValue::Address).collect()),
            DynSolValue::Array(token_ids.into_iter().map(uint256).collect()),
            DynSolValue::Bytes(progress_data.to_vec()),
            DynSolValue::Bytes(extra_data.to_vec()),
        ],
    )
}

/// `cancel(proposalId, proposal)`, valid once the cancel delay has elapsed.
pub fn cancel(
    party: &ResolvedContract,
    proposal_id: U256,
    proposal: &RawProposal,
) -> Result<TxRequest, PartyError> {
    build(party, "cancel", &[uint256(proposal_id), proposal.to_dyn_value()?])
}
