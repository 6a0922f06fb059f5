//! Marketplace orders recovered from listing proposals.

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

/// Price shape of the listing event that created the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderKind {
    Standard { list_price: U256 },
    Advanced { start_price: U256, end_price: U256 },
}

/// Marketplace `getOrderStatus(orderHash)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatus {
    pub is_validated: bool,
    pub is_cancelled: bool,
    pub total_filled: U256,
    pub total_size: U256,
}

/// A listing order joined with its live fill state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order_hash: B256,
    pub kind: OrderKind,
    pub token: Address,
    pub token_id: U256,
    /// Unix timestamp after which the order can no longer be filled.
    pub expiry: U256,
    pub block_number: u64,
    pub transaction_hash: B256,
    pub status: OrderStatus,
}

impl OrderDetails {
    pub fn is_filled(&self) -> bool {
        self.status.total_filled > U256::ZERO
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expiry <= U256::from(now)
    }
}
