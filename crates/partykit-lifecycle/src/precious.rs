//! A party's precious-asset list.

use alloy_primitives::{Address, U256};
use partykit_codec::ProposalVariant;
use serde::{Deserialize, Serialize};

/// The `(token, tokenId)` pairs a party registered as precious at creation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreciousList {
    pub tokens: Vec<(Address, U256)>,
}

impl PreciousList {
    /// Pair up the parallel `preciousTokens` / `preciousTokenIds` arrays.
    /// Extra entries in the longer array are dropped.
    pub fn from_parallel(tokens: Vec<Address>, token_ids: Vec<U256>) -> Self {
        Self { tokens: tokens.into_iter().zip(token_ids).collect() }
    }

    pub fn contains(&self, token: Address, token_id: U256) -> bool {
        self.tokens.iter().any(|(t, id)| *t == token && *id == token_id)
    }

    /// Whether `variant` lists a precious asset on the primary marketplace.
    pub fn is_precious_listing(&self, variant: &ProposalVariant) -> bool {
        variant
            .marketplace_listing()
            .map(|(token, id)| self.contains(token, id))
            .unwrap_or(false)
    }

    /// Split back into the two arrays `execute` expects.
    pub fn to_parallel(&self) -> (Vec<Address>, Vec<U256>) {
        self.tokens.iter().copied().unzip()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
