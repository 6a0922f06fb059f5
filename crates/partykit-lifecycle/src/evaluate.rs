//! Derived execution flags, presentation status and the next owed step.

use partykit_codec::ProposalVariant;
use serde::{Deserialize, Serialize};

use crate::order::OrderDetails;
use crate::precious::PreciousList;
use crate::status::ProposalStatus;
use crate::values::ProposalStateValues;

/// Everything the evaluator looks at for one proposal.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleInput<'a> {
    /// Status as reported by the chain.
    pub status: ProposalStatus,
    pub values: &'a ProposalStateValues,
    pub max_executable_time: u64,
    pub cancel_delay: u64,
    pub variant: Option<&'a ProposalVariant>,
    pub precious: Option<&'a PreciousList>,
    pub order: Option<&'a OrderDetails>,
    /// Unix seconds.
    pub now: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedExecutionFlags {
    pub is_expired: bool,
    pub is_unanimous: bool,
    pub is_vetoed: bool,
    pub is_precious_listing: bool,
    /// Execution is split in two because a precious asset is listed without
    /// unanimous support.
    pub requires_safety_step: bool,
    pub is_multi_step_pending: bool,
    pub is_sale_consummated: bool,
    pub is_cancellable: bool,
}

/// Raw status refined for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    Invalid,
    Voting,
    Defeated,
    Passed,
    Ready,
    InProgress,
    Complete,
    Cancelled,
    /// `Ready` but past `maxExecutableTime`; can no longer be executed.
    Expired,
    /// A `Complete` listing whose order never filled.
    Unsold,
}

impl From<ProposalStatus> for DisplayStatus {
    fn from(status: ProposalStatus) -> Self {
        match status {
            ProposalStatus::Invalid => Self::Invalid,
            ProposalStatus::Voting => Self::Voting,
            ProposalStatus::Defeated => Self::Defeated,
            ProposalStatus::Passed => Self::Passed,
            ProposalStatus::Ready => Self::Ready,
            ProposalStatus::InProgress => Self::InProgress,
            ProposalStatus::Complete => Self::Complete,
            ProposalStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// What a member can do next to move execution forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    None,
    Execute,
    /// The first step of a two-step listing ran; the listing itself is owed.
    ExecuteSecondStep,
    /// The order filled or lapsed; execute once more to settle.
    Finalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub status: ProposalStatus,
    pub display_status: DisplayStatus,
    pub flags: DerivedExecutionFlags,
    pub next_step: NextStep,
}

pub fn evaluate(input: &LifecycleInput<'_>) -> Evaluation {
    let flags = derive_flags(input);
    Evaluation {
        status: input.status,
        display_status: display_status(input, &flags),
        next_step: next_step(input, &flags),
        flags,
    }
}

pub fn derive_flags(input: &LifecycleInput<'_>) -> DerivedExecutionFlags {
    let values = input.values;
    let is_unanimous = values.is_unanimous();
    let is_precious_listing = match (input.variant, input.precious) {
        (Some(variant), Some(precious)) => precious.is_precious_listing(variant),
        _ => false,
    };
    let requires_safety_step = is_precious_listing && !is_unanimous;
    let in_progress = input.status == ProposalStatus::InProgress;

    DerivedExecutionFlags {
        is_expired: input.max_executable_time < input.now,
        is_unanimous,
        is_vetoed: values.is_vetoed(),
        is_precious_listing,
        requires_safety_step,
        is_multi_step_pending: requires_safety_step && in_progress && input.order.is_none(),
        is_sale_consummated: input.order.map(OrderDetails::is_filled).unwrap_or(false),
        is_cancellable: in_progress
            && input.now >= values.executed_time.saturating_add(input.cancel_delay),
    }
}

fn display_status(input: &LifecycleInput<'_>, flags: &DerivedExecutionFlags) -> DisplayStatus {
    match input.status {
        ProposalStatus::Ready if flags.is_expired => DisplayStatus::Expired,
        ProposalStatus::Complete
            if input.variant.map(|v| v.marketplace_listing().is_some()).unwrap_or(false)
                && input.order.map(|o| !o.is_filled()).unwrap_or(false) =>
        {
            DisplayStatus::Unsold
        }
        status => status.into(),
    }
}

fn next_step(input: &LifecycleInput<'_>, flags: &DerivedExecutionFlags) -> NextStep {
    match input.status {
        ProposalStatus::Ready if !flags.is_expired => NextStep::Execute,
        ProposalStatus::InProgress if flags.is_multi_step_pending => NextStep::ExecuteSecondStep,
        ProposalStatus::InProgress => match input.order {
            Some(order) if order.is_filled() || order.is_expired(input.now) || flags.is_expired => {
                NextStep::Finalize
            }
            _ => NextStep::None,
        },
        _ => NextStep::None,
    }
}
