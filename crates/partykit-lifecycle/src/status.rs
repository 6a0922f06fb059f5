//! The on-chain proposal status and its recomputation.

use partykit_core::PartyError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::values::{GovernanceValues, ProposalStateValues, VETO_VOTES};

/// Raw proposal status as reported by `getProposalStateInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ProposalStatus {
    Invalid = 0,
    Voting = 1,
    Defeated = 2,
    Passed = 3,
    Ready = 4,
    InProgress = 5,
    Complete = 6,
    Cancelled = 7,
}

impl ProposalStatus {
    pub const ALL: [ProposalStatus; 8] = [
        Self::Invalid,
        Self::Voting,
        Self::Defeated,
        Self::Passed,
        Self::Ready,
        Self::InProgress,
        Self::Complete,
        Self::Cancelled,
    ];

    /// Map an on-chain status code. Codes outside 0..=7 are a data-integrity
    /// fault and are never coerced.
    pub fn from_code(code: u64) -> Result<Self, PartyError> {
        usize::try_from(code)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(PartyError::UnknownProposalStatus { code })
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// `Complete` or `Cancelled`.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Complete | Self::Cancelled)
    }
}

impl TryFrom<u8> for ProposalStatus {
    type Error = PartyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code as u64)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Invalid => "Invalid",
            Self::Voting => "Voting",
            Self::Defeated => "Defeated",
            Self::Passed => "Passed",
            Self::Ready => "Ready",
            Self::InProgress => "InProgress",
            Self::Complete => "Complete",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(s)
    }
}

/// Recompute the status from raw values the same way the governance
/// contract does, at timestamp `now`.
pub fn compute_status(
    values: &ProposalStateValues,
    governance: &GovernanceValues,
    now: u64,
) -> ProposalStatus {
    if values.proposed_time == 0 {
        return ProposalStatus::Invalid;
    }
    if values.executed_time != 0 {
        if values.completed_time == 0 {
            return ProposalStatus::InProgress;
        }
        if values.is_cancelled() {
            return ProposalStatus::Cancelled;
        }
        return ProposalStatus::Complete;
    }
    if values.votes == VETO_VOTES {
        return ProposalStatus::Defeated;
    }
    if values.passed_time != 0 {
        if values.passed_time.saturating_add(governance.execution_delay) <= now
            || values.is_unanimous()
            || values.hosts_accepted()
        {
            return ProposalStatus::Ready;
        }
        return ProposalStatus::Passed;
    }
    if values.proposed_time.saturating_add(governance.vote_duration) <= now {
        return ProposalStatus::Defeated;
    }
    ProposalStatus::Voting
}
