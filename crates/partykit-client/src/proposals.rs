//! Reading proposals and their on-chain state from a party.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{Address, B256, U256};
use partykit_codec::{decode_batch, ProposalVariant, RawProposal};
use partykit_core::{BlockTag, ChainReader, LogFilter, PartyError};
use partykit_lifecycle::{GovernanceValues, PreciousList, ProposalStateValues, ProposalStatus};
use serde::Serialize;

use crate::abi::{self, arg, as_address, as_array, as_tuple, as_u128, as_u64, as_uint};
use crate::interface::ResolvedContract;

/// One `Proposed` event, decoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    pub id: U256,
    pub proposer: Address,
    pub raw: RawProposal,
    /// `None` when `proposal_data` does not match the schema for its tag.
    pub variant: Option<ProposalVariant>,
    pub block_number: u64,
    pub transaction_hash: B256,
}

/// On-chain state of one proposal plus the governance values it is judged by.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalState {
    pub id: U256,
    pub status: ProposalStatus,
    pub values: ProposalStateValues,
    /// Party-wide values, overridden by per-proposal snapshots where the
    /// deployment records them.
    pub governance: GovernanceValues,
}

/// Proposal reads against one resolved party.
pub struct ProposalReader<'a> {
    reader: &'a dyn ChainReader,
    party: &'a ResolvedContract,
}

impl<'a> ProposalReader<'a> {
    pub fn new(reader: &'a dyn ChainReader, party: &'a ResolvedContract) -> Self {
        Self { reader, party }
    }

    /// Every proposal ever made, in chain order.
    pub async fn proposals(&self) -> Result<Vec<ProposalRecord>, PartyError> {
        let event = self.party.descriptor.event("Proposed")?;
        let filter = LogFilter::new(self.party.address).event(event.selector());
        let logs = self.reader.get_logs(&filter).await?;

        let mut records = Vec::with_capacity(logs.len());
        for log in &logs {
            let args = abi::decode_log(event, log)?;
            let raw = RawProposal::from_dyn_value(arg(&args, 2, "Proposed")?.clone())?;
            records.push(ProposalRecord {
                id: as_uint(arg(&args, 0, "Proposed")?)?,
                proposer: as_address(arg(&args, 1, "Proposed")?)?,
                raw,
                variant: None,
                block_number: log.block_number,
                transaction_hash: log.transaction_hash,
            });
        }

        let payloads: Vec<&[u8]> = records.iter().map(|r| r.raw.proposal_data.as_ref()).collect();
        let decoded = decode_batch(&payloads);
        for (record, decoded) in records.iter_mut().zip(decoded) {
            match decoded {
                Ok(variant) => record.variant = Some(variant),
                Err(e) => {
                    tracing::warn!(party = %self.party.address, id = %record.id, error = %e, "undecodable proposal data")
                }
            }
        }

        tracing::debug!(party = %self.party.address, count = records.len(), "read proposals");
        Ok(records)
    }

    pub async fn governance_values(&self) -> Result<GovernanceValues, PartyError> {
        let out = self
            .party
            .call(self.reader, "getGovernanceValues", &[], BlockTag::Latest)
            .await?;
        parse_governance_values(arg(&out, 0, "getGovernanceValues")?)
    }

    /// States for many proposals in one batched round trip.
    ///
    /// Results are index-aligned with `ids`. A proposal whose read reverts or
    /// reports an unknown status code gets an `Err` in its slot; the other
    /// slots are unaffected.
    pub async fn states(
        &self,
        ids: &[U256],
    ) -> Result<Vec<Result<ProposalState, PartyError>>, PartyError> {
        let mut requests = Vec::with_capacity(ids.len() + 1);
        requests.push(self.party.call_request("getGovernanceValues", &[])?);
        for id in ids {
            requests.push(self.party.call_request("getProposalStateInfo", &[uint256(*id)])?);
        }

        let mut items = self.reader.multicall(&requests, BlockTag::Latest).await?.into_iter();
        let governance = match items.next() {
            Some(item) => {
                let out = self.party.decode_output("getGovernanceValues", &item?)?;
                parse_governance_values(arg(&out, 0, "getGovernanceValues")?)?
            }
            None => return Err(PartyError::Other("empty multicall result".into())),
        };

        let states = ids
            .iter()
            .zip(items)
            .map(|(&id, item)| {
                let state = item
                    .map_err(PartyError::from)
                    .and_then(|data| self.parse_state(id, &data, &governance));
                if let Err(e) = &state {
                    tracing::warn!(party = %self.party.address, %id, error = %e, "proposal state unavailable");
                }
                state
            })
            .collect();
        Ok(states)
    }

    /// State of a single proposal, read in the same batch as the governance
    /// values. Any failure, including an unknown status code, is returned as
    /// the error.
    pub async fn state(&self, id: U256) -> Result<ProposalState, PartyError> {
        self.states(&[id])
            .await?
            .pop()
            .unwrap_or_else(|| Err(PartyError::Other("empty multicall result".into())))
    }

    /// The precious list recorded when the party was initialised, if the
    /// `PartyInitialized` event can be found.
    pub async fn precious_list(&self) -> Result<Option<PreciousList>, PartyError> {
        let event = self.party.descriptor.event("PartyInitialized")?;
        let filter = LogFilter::new(self.party.address).event(event.selector());
        let logs = self.reader.get_logs(&filter).await?;
        let Some(log) = logs.first() else {
            return Ok(None);
        };

        let args = abi::decode_log(event, log)?;
        let tokens = as_array(arg(&args, 1, "PartyInitialized")?)?
            .iter()
            .map(as_address)
            .collect::<Result<Vec<_>, _>>()?;
        let ids = as_array(arg(&args, 2, "PartyInitialized")?)?
            .iter()
            .map(as_uint)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(PreciousList::from_parallel(tokens, ids)))
    }

    fn parse_state(
        &self,
        id: U256,
        data: &[u8],
        governance: &GovernanceValues,
    ) -> Result<ProposalState, PartyError> {
        let out = self.party.decode_output("getProposalStateInfo", data)?;
        let status = ProposalStatus::from_code(as_u64(arg(&out, 0, "getProposalStateInfo")?)?)?;
        let (values, governance) =
            parse_state_values(as_tuple(arg(&out, 1, "getProposalStateInfo")?)?, governance)?;
        Ok(ProposalState { id, status, values, governance })
    }
}

fn uint256(value: U256) -> DynSolValue {
    DynSolValue::Uint(value, 256)
}

/// `(voteDuration, executionDelay, passThresholdBps, totalVotingPower)`.
pub(crate) fn parse_governance_values(value: &DynSolValue) -> Result<GovernanceValues, PartyError> {
    let fields = as_tuple(value)?;
    let field = |i| arg(fields, i, "governance values");
    Ok(GovernanceValues {
        vote_duration: as_u64(field(0)?)?,
        execution_delay: as_u64(field(1)?)?,
        pass_threshold_bps: narrow_u16(field(2)?)?,
        total_voting_power: as_u128(field(3)?)?,
    })
}

/// The values tuple grew over deployments:
///
/// * 5 fields: times and votes only
/// * 8 fields: adds `totalVotingPower, numHosts, numHostsAccepted`
/// * 11 fields: adds `voteDuration, executionDelay, passThresholdBps`
///
/// Anything a generation does not report comes from the party's governance values.
pub(crate) fn parse_state_values(
    fields: &[DynSolValue],
    governance: &GovernanceValues,
) -> Result<(ProposalStateValues, GovernanceValues), PartyError> {
    if !matches!(fields.len(), 5 | 8 | 11) {
        return Err(PartyError::abi(format!(
            "proposal state values have {} fields",
            fields.len()
        )));
    }

    let mut values = ProposalStateValues {
        proposed_time: as_u64(&fields[0])?,
        passed_time: as_u64(&fields[1])?,
        executed_time: as_u64(&fields[2])?,
        completed_time: as_u64(&fields[3])?,
        votes: as_u128(&fields[4])?,
        total_voting_power: governance.total_voting_power,
        pass_threshold_bps: governance.pass_threshold_bps,
        num_hosts: 0,
        num_hosts_accepted: 0,
    };
    let mut effective = *governance;

    if fields.len() >= 8 {
        values.total_voting_power = as_u128(&fields[5])?;
        values.num_hosts = narrow_u8(&fields[6])?;
        values.num_hosts_accepted = narrow_u8(&fields[7])?;
        effective.total_voting_power = values.total_voting_power;
    }
    if fields.len() == 11 {
        effective.vote_duration = as_u64(&fields[8])?;
        effective.execution_delay = as_u64(&fields[9])?;
        effective.pass_threshold_bps = narrow_u16(&fields[10])?;
        values.pass_threshold_bps = effective.pass_threshold_bps;
    }
    Ok((values, effective))
}

fn narrow_u16(value: &DynSolValue) -> Result<u16, PartyError> {
    let v = as_u64(value)?;
    u16::try_from(v).map_err(|_| PartyError::abi(format!("{v} does not fit in u16")))
}

fn narrow_u8(value: &DynSolValue) -> Result<u8, PartyError> {
    let v = as_u64(value)?;
    u8::try_from(v).map_err(|_| PartyError::abi(format!("{v} does not fit in u8")))
}
