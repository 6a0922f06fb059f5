//! Logical contract families.
//!
//! The protocol was redeployed many times; every redeployment produced a new
//! interface for one of these families. Each family is resolved independently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractFamily {
    /// The governance container itself.
    Party,
    /// Logic the party delegatecalls into when executing proposals.
    ProposalExecutionEngine,
    PartyFactory,
    CrowdfundFactory,
    AuctionCrowdfund,
    BuyCrowdfund,
    CollectionBuyCrowdfund,
    CollectionBatchBuyCrowdfund,
    RollingAuctionCrowdfund,
    InitialEthCrowdfund,
    TokenDistributor,
    PartyHelpers,
    BondingCurveAuthority,
}

impl ContractFamily {
    pub const ALL: [ContractFamily; 13] = [
        ContractFamily::Party,
        ContractFamily::ProposalExecutionEngine,
        ContractFamily::PartyFactory,
        ContractFamily::CrowdfundFactory,
        ContractFamily::AuctionCrowdfund,
        ContractFamily::BuyCrowdfund,
        ContractFamily::CollectionBuyCrowdfund,
        ContractFamily::CollectionBatchBuyCrowdfund,
        ContractFamily::RollingAuctionCrowdfund,
        ContractFamily::InitialEthCrowdfund,
        ContractFamily::TokenDistributor,
        ContractFamily::PartyHelpers,
        ContractFamily::BondingCurveAuthority,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContractFamily::Party => "party",
            ContractFamily::ProposalExecutionEngine => "proposal_execution_engine",
            ContractFamily::PartyFactory => "party_factory",
            ContractFamily::CrowdfundFactory => "crowdfund_factory",
            ContractFamily::AuctionCrowdfund => "auction_crowdfund",
            ContractFamily::BuyCrowdfund => "buy_crowdfund",
            ContractFamily::CollectionBuyCrowdfund => "collection_buy_crowdfund",
            ContractFamily::CollectionBatchBuyCrowdfund => "collection_batch_buy_crowdfund",
            ContractFamily::RollingAuctionCrowdfund => "rolling_auction_crowdfund",
            ContractFamily::InitialEthCrowdfund => "initial_eth_crowdfund",
            ContractFamily::TokenDistributor => "token_distributor",
            ContractFamily::PartyHelpers => "party_helpers",
            ContractFamily::BondingCurveAuthority => "bonding_curve_authority",
        }
    }

    /// Families deployed behind a proxy whose logic address must be resolved
    /// before the registry can be consulted. Singletons are looked up directly.
    pub fn is_proxied(self) -> bool {
        matches!(
            self,
            ContractFamily::Party
                | ContractFamily::AuctionCrowdfund
                | ContractFamily::BuyCrowdfund
                | ContractFamily::CollectionBuyCrowdfund
                | ContractFamily::CollectionBatchBuyCrowdfund
                | ContractFamily::RollingAuctionCrowdfund
                | ContractFamily::InitialEthCrowdfund
        )
    }
}

impl fmt::Display for ContractFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract family: {0}")]
pub struct UnknownFamily(pub String);

impl FromStr for ContractFamily {
    type Err = UnknownFamily;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| UnknownFamily(s.to_string()))
    }
}
