//! EIP-1167 minimal proxy detection.
//!
//! Party and crowdfund instances are deployed as minimal proxies (clones) or
//! as proxies exposing an `IMPL()` accessor. This module covers the pure
//! bytecode half of that check; the accessor call lives in the client.

use alloy_primitives::Address;

/// EIP-1167 minimal proxy bytecode prefix (20-byte address embedded at offset 10)
pub const EIP1167_BYTECODE_PREFIX: [u8; 10] = [
    0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d, 0x3d, 0x36, 0x3d, 0x73,
];

/// EIP-1167 minimal proxy bytecode suffix
pub const EIP1167_BYTECODE_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Total length of a minimal proxy's runtime bytecode.
pub const EIP1167_BYTECODE_LEN: usize = 45;

/// Detect an EIP-1167 minimal proxy from raw runtime bytecode.
///
/// Layout: `[10 prefix bytes] [20 address bytes] [15 suffix bytes]`.
/// Returns the embedded implementation address, or `None` if any part of
/// the pattern does not match.
pub fn detect_eip1167_clone(bytecode: &[u8]) -> Option<Address> {
    if bytecode.len() != EIP1167_BYTECODE_LEN {
        return None;
    }
    if bytecode[..10] != EIP1167_BYTECODE_PREFIX {
        return None;
    }
    if bytecode[30..] != EIP1167_BYTECODE_SUFFIX {
        return None;
    }
    Some(Address::from_slice(&bytecode[10..30]))
}

/// Build the runtime bytecode of a minimal proxy pointing at `implementation`.
pub fn eip1167_runtime_code(implementation: Address) -> Vec<u8> {
    let mut code = Vec::with_capacity(EIP1167_BYTECODE_LEN);
    code.extend_from_slice(&EIP1167_BYTECODE_PREFIX);
    code.extend_from_slice(implementation.as_slice());
    code.extend_from_slice(&EIP1167_BYTECODE_SUFFIX);
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_eip1167_valid() {
        let implementation = Address::repeat_byte(0xab);
        let bytecode = eip1167_runtime_code(implementation);
        assert_eq!(bytecode.len(), 45);
        assert_eq!(detect_eip1167_clone(&bytecode), Some(implementation));
    }

    #[test]
    fn any_embedded_address_round_trips() {
        for seed in [0x00u8, 0x01, 0x7f, 0xff] {
            let mut raw = [seed; 20];
            raw[0] = seed.wrapping_add(3);
            let implementation = Address::from(raw);
            let code = eip1167_runtime_code(implementation);
            assert_eq!(detect_eip1167_clone(&code), Some(implementation));
        }
    }

    #[test]
    fn detect_eip1167_wrong_length() {
        let mut bytecode = eip1167_runtime_code(Address::repeat_byte(1));
        bytecode.push(0);
        assert!(detect_eip1167_clone(&bytecode).is_none());
        assert!(detect_eip1167_clone(&bytecode[..44]).is_none());
    }

    #[test]
    fn corrupted_prefix_or_suffix_rejected() {
        let good = eip1167_runtime_code(Address::repeat_byte(2));

        let mut bad_prefix = good.clone();
        bad_prefix[0] ^= 0xff;
        assert!(detect_eip1167_clone(&bad_prefix).is_none());

        let mut bad_suffix = good;
        bad_suffix[44] ^= 0xff;
        assert!(detect_eip1167_clone(&bad_suffix).is_none());
    }
}
