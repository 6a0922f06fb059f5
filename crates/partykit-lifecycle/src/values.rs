//! Governance parameters and per-proposal vote bookkeeping.

use serde::{Deserialize, Serialize};

/// `votes` is set to `type(uint96).max` when a host vetoes.
pub const VETO_VOTES: u128 = (1u128 << 96) - 1;

/// High bit of the 40-bit `completedTime`, set when execution was cancelled.
pub const CANCELLED_FLAG: u64 = 1 << 39;

/// `getGovernanceValues()` of a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GovernanceValues {
    pub vote_duration: u64,
    pub execution_delay: u64,
    pub pass_threshold_bps: u16,
    pub total_voting_power: u128,
}

/// The `values` half of `getProposalStateInfo(proposalId)`.
///
/// Older deployments do not report `total_voting_power` or
/// `pass_threshold_bps` per proposal; readers fill them from the party's
/// governance values. `num_hosts` is zero where hosts are not tracked.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalStateValues {
    pub proposed_time: u64,
    pub passed_time: u64,
    pub executed_time: u64,
    pub completed_time: u64,
    pub votes: u128,
    pub total_voting_power: u128,
    pub pass_threshold_bps: u16,
    #[serde(default)]
    pub num_hosts: u8,
    #[serde(default)]
    pub num_hosts_accepted: u8,
}

impl ProposalStateValues {
    pub fn is_unanimous(&self) -> bool {
        self.votes == self.total_voting_power
    }

    pub fn is_vetoed(&self) -> bool {
        self.votes == VETO_VOTES
    }

    pub fn is_cancelled(&self) -> bool {
        self.completed_time & CANCELLED_FLAG == CANCELLED_FLAG
    }

    /// Every host has accepted. Always `false` when the party has no hosts.
    pub fn hosts_accepted(&self) -> bool {
        self.num_hosts > 0 && self.num_hosts_accepted >= self.num_hosts
    }
}
