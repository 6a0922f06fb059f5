//! # partykit-lifecycle
//!
//! Pure proposal lifecycle evaluation. Nothing here performs I/O: callers
//! read state from the chain and pass it in together with the current time.

pub mod evaluate;
pub mod order;
pub mod precious;
pub mod status;
pub mod values;

pub use evaluate::{
    derive_flags, evaluate, DerivedExecutionFlags, DisplayStatus, Evaluation, LifecycleInput,
    NextStep,
};
pub use order::{OrderDetails, OrderKind, OrderStatus};
pub use precious::PreciousList;
pub use status::{compute_status, ProposalStatus};
pub use values::{GovernanceValues, ProposalStateValues, CANCELLED_FLAG, VETO_VOTES};
