//! Address parsing and topic helpers.
//!
//! Addresses are always compared in lower-cased form; checksums are accepted
//! but never required.

use alloy_primitives::{Address, B256, U256};
use std::str::FromStr;

/// Parse a hex address, ignoring EIP-55 casing.
pub fn parse_address(value: &str) -> Result<Address, String> {
    let trimmed = value.trim();
    let lower = trimmed.to_ascii_lowercase();
    let hex = lower.strip_prefix("0x").unwrap_or(&lower);
    if hex.len() != 40 {
        return Err(format!("expected 40 hex chars, got {}", hex.len()));
    }
    Address::from_str(&format!("0x{hex}")).map_err(|e| e.to_string())
}

/// Lower-cased `0x`-prefixed form used for display and comparison.
pub fn normalize_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

/// An address left-padded into a 32-byte indexed topic.
pub fn address_topic(address: Address) -> B256 {
    address.into_word()
}

/// A uint256 indexed topic.
pub fn u256_topic(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}
