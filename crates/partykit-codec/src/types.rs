//! Strongly typed proposal payloads.
//!
//! One struct per proposal type, joined into the closed [`ProposalVariant`]
//! sum type. Field order and integer widths mirror the on-chain structs;
//! narrow integers (`uint40`, `uint96`) are held in the smallest native type
//! that fits and range-checked on encode.

use alloy_primitives::{Address, Bytes, FixedBytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel token address used by distributions of the native currency.
pub const ETH_SENTINEL: Address = Address::new([0xee; 20]);

/// The 4-byte tag at the head of every proposal payload.
///
/// Discriminants follow the deployed `ProposalType` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum ProposalType {
    Invalid = 0,
    ListOnMarketplace = 1,
    ListOnAlternateMarketplace = 2,
    Fractionalize = 3,
    ArbitraryCalls = 4,
    UpgradeExecutionEngine = 5,
    ListOnMarketplaceAdvanced = 6,
    Distribute = 7,
    AddAuthority = 8,
    Operator = 9,
}

impl ProposalType {
    /// Map a wire tag to its type. Tags follow the deployed `ProposalType`
    /// enum. Tag 0 and anything past 9 are `Invalid`.
    pub fn from_tag(tag: u32) -> Self {
        match tag {
            1 => ProposalType::ListOnMarketplace,
            2 => ProposalType::ListOnAlternateMarketplace,
            3 => ProposalType::Fractionalize,
            4 => ProposalType::ArbitraryCalls,
            5 => ProposalType::UpgradeExecutionEngine,
            6 => ProposalType::ListOnMarketplaceAdvanced,
            7 => ProposalType::Distribute,
            8 => ProposalType::AddAuthority,
            9 => ProposalType::Operator,
            _ => ProposalType::Invalid,
        }
    }

    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for ProposalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProposalType::Invalid => "Invalid",
            ProposalType::ListOnMarketplace => "ListOnMarketplace",
            ProposalType::ListOnAlternateMarketplace => "ListOnAlternateMarketplace",
            ProposalType::Fractionalize => "Fractionalize",
            ProposalType::ArbitraryCalls => "ArbitraryCalls",
            ProposalType::UpgradeExecutionEngine => "UpgradeExecutionEngine",
            ProposalType::ListOnMarketplaceAdvanced => "ListOnMarketplaceAdvanced",
            ProposalType::Distribute => "Distribute",
            ProposalType::AddAuthority => "AddAuthority",
            ProposalType::Operator => "Operator",
        };
        f.write_str(name)
    }
}

/// Token standard of an advanced marketplace listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTokenType {
    Erc721 = 0,
    Erc1155 = 1,
}

impl ListingTokenType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Erc721),
            1 => Some(Self::Erc1155),
            _ => None,
        }
    }
}

/// Token kind of a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionTokenType {
    Native = 0,
    Erc20 = 1,
    Erc1155 = 2,
}

impl DistributionTokenType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Native),
            1 => Some(Self::Erc20),
            2 => Some(Self::Erc1155),
            _ => None,
        }
    }
}

/// Fixed-price listing on the primary marketplace (Seaport).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOnMarketplace {
    pub list_price: U256,
    /// Seconds; `uint40` on chain.
    pub duration: u64,
    pub token: Address,
    pub token_id: U256,
    pub fees: Vec<U256>,
    pub fee_recipients: Vec<Address>,
    pub domain_hash_prefix: FixedBytes<4>,
}

/// Reserve auction on the alternate marketplace (Zora).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOnAlternateMarketplace {
    pub list_price: U256,
    pub timeout: u64,
    pub duration: u64,
    pub token: Address,
    pub token_id: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fractionalize {
    pub token: Address,
    pub token_id: U256,
    pub list_price: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitraryCall {
    pub target: Address,
    pub value: U256,
    pub data: Bytes,
    /// Execution continues if this call reverts.
    pub optional: bool,
    /// `keccak256` of the expected return data, or zero to skip the check.
    pub expected_result_hash: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArbitraryCalls {
    pub calls: Vec<ArbitraryCall>,
}

/// Encoded as a bare `(address, bytes)` pair, not a struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeExecutionEngine {
    pub new_engine: Address,
    pub init_data: Bytes,
}

/// Dutch-auction or fixed-price listing with explicit start/end prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOnMarketplaceAdvanced {
    pub start_price: U256,
    pub end_price: U256,
    pub duration: u64,
    pub token_type: ListingTokenType,
    pub token: Address,
    pub token_id: U256,
    pub fees: Vec<U256>,
    pub fee_recipients: Vec<Address>,
    pub conduit_key: B256,
    pub zone: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Distribute {
    pub amount: U256,
    pub token_type: DistributionTokenType,
    pub token: Address,
    pub token_id: U256,
}

impl Distribute {
    /// A native-currency distribution.
    pub fn native(amount: U256) -> Self {
        Self {
            amount,
            token_type: DistributionTokenType::Native,
            token: ETH_SENTINEL,
            token_id: U256::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddAuthority {
    pub target: Address,
    pub call_data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub allow_operators_to_spend_funds: bool,
    pub operator: Address,
    /// `uint96` on chain.
    pub operator_value: u128,
    pub operator_data: Bytes,
}

/// A decoded proposal payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProposalVariant {
    /// Tag 0 or an unknown tag. The payload is kept verbatim and never interpreted.
    Invalid { tag: u32, payload: Bytes },
    ListOnMarketplace(ListOnMarketplace),
    ListOnAlternateMarketplace(ListOnAlternateMarketplace),
    Fractionalize(Fractionalize),
    ArbitraryCalls(ArbitraryCalls),
    UpgradeExecutionEngine(UpgradeExecutionEngine),
    ListOnMarketplaceAdvanced(ListOnMarketplaceAdvanced),
    Distribute(Distribute),
    AddAuthority(AddAuthority),
    Operator(Operator),
}

impl ProposalVariant {
    pub fn proposal_type(&self) -> ProposalType {
        match self {
            ProposalVariant::Invalid { .. } => ProposalType::Invalid,
            ProposalVariant::ListOnMarketplace(_) => ProposalType::ListOnMarketplace,
            ProposalVariant::ListOnAlternateMarketplace(_) => ProposalType::ListOnAlternateMarketplace,
            ProposalVariant::Fractionalize(_) => ProposalType::Fractionalize,
            ProposalVariant::ArbitraryCalls(_) => ProposalType::ArbitraryCalls,
            ProposalVariant::UpgradeExecutionEngine(_) => ProposalType::UpgradeExecutionEngine,
            ProposalVariant::ListOnMarketplaceAdvanced(_) => ProposalType::ListOnMarketplaceAdvanced,
            ProposalVariant::Distribute(_) => ProposalType::Distribute,
            ProposalVariant::AddAuthority(_) => ProposalType::AddAuthority,
            ProposalVariant::Operator(_) => ProposalType::Operator,
        }
    }

    /// The wire tag this variant encodes with.
    pub fn tag(&self) -> u32 {
        match self {
            ProposalVariant::Invalid { tag, .. } => *tag,
            other => other.proposal_type().tag(),
        }
    }

    /// `(token, tokenId)` of a primary-marketplace listing, the proposals
    /// subject to the precious-asset safety step.
    pub fn marketplace_listing(&self) -> Option<(Address, U256)> {
        match self {
            ProposalVariant::ListOnMarketplace(p) => Some((p.token, p.token_id)),
            ProposalVariant::ListOnMarketplaceAdvanced(p) => Some((p.token, p.token_id)),
            _ => None,
        }
    }

    /// `(token, tokenId)` of any proposal that sells or locks up a single NFT.
    pub fn listed_token(&self) -> Option<(Address, U256)> {
        match self {
            ProposalVariant::ListOnAlternateMarketplace(p) => Some((p.token, p.token_id)),
            ProposalVariant::Fractionalize(p) => Some((p.token, p.token_id)),
            other => other.marketplace_listing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_one_through_nine_are_distinct() {
        let mut seen = std::collections::HashSet::new();
        for tag in 1..=9u32 {
            let ty = ProposalType::from_tag(tag);
            assert_ne!(ty, ProposalType::Invalid);
            assert_eq!(ty.tag(), tag);
            assert!(seen.insert(ty));
        }
    }

    #[test]
    fn tags_match_deployed_enum_order() {
        assert_eq!(ProposalType::from_tag(2), ProposalType::ListOnAlternateMarketplace);
        assert_eq!(ProposalType::from_tag(5), ProposalType::UpgradeExecutionEngine);
        assert_eq!(ProposalType::from_tag(6), ProposalType::ListOnMarketplaceAdvanced);
        assert_eq!(ProposalType::Distribute.tag(), 7);
        assert_eq!(ProposalType::Operator.tag(), 9);
    }

    #[test]
    fn out_of_range_tags_are_invalid() {
        for tag in [0u32, 10, 11, 255, u32::MAX] {
            assert_eq!(ProposalType::from_tag(tag), ProposalType::Invalid);
        }
    }

    #[test]
    fn only_primary_listings_are_marketplace_listings() {
        let alt = ProposalVariant::ListOnAlternateMarketplace(ListOnAlternateMarketplace {
            list_price: U256::from(1u64),
            timeout: 1,
            duration: 1,
            token: Address::repeat_byte(1),
            token_id: U256::from(2u64),
        });
        assert!(alt.marketplace_listing().is_none());
        assert_eq!(alt.listed_token(), Some((Address::repeat_byte(1), U256::from(2u64))));
    }

    #[test]
    fn native_distribution_uses_sentinel() {
        let d = Distribute::native(U256::from(1000u64));
        assert_eq!(d.token, ETH_SENTINEL);
        assert_eq!(d.token_type, DistributionTokenType::Native);
    }
}
