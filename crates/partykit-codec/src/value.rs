//! Conversions between `DynSolValue` trees and native field types.

use alloy_core::dyn_abi::DynSolValue;
use alloy_primitives::{Address, FixedBytes, B256, U256};
use partykit_core::CodecError;

/// Sequential reader over the members of a decoded tuple.
///
/// Every accessor names the field it reads so a schema mismatch points at
/// the offending member.
pub(crate) struct Fields {
    values: std::vec::IntoIter<DynSolValue>,
}

impl Fields {
    pub fn from_tuple(value: DynSolValue) -> Result<Self, String> {
        match value {
            DynSolValue::Tuple(values) => Ok(Self { values: values.into_iter() }),
            other => Err(format!("expected tuple, got {other:?}")),
        }
    }

    fn next(&mut self, field: &str) -> Result<DynSolValue, String> {
        self.values.next().ok_or_else(|| format!("missing field '{field}'"))
    }

    pub fn uint(&mut self, field: &str) -> Result<U256, String> {
        match self.next(field)? {
            DynSolValue::Uint(v, _) => Ok(v),
            other => Err(format!("'{field}': expected uint, got {other:?}")),
        }
    }

    /// A `uintN` with `N <= 64`, checked against its declared width.
    pub fn narrow_u64(&mut self, field: &str, bits: usize) -> Result<u64, String> {
        let v = self.uint(field)?;
        if v.bit_len() > bits {
            return Err(format!("'{field}': {v} does not fit in uint{bits}"));
        }
        Ok(v.to::<u64>())
    }

    /// A `uintN` with `64 < N <= 128`.
    pub fn narrow_u128(&mut self, field: &str, bits: usize) -> Result<u128, String> {
        let v = self.uint(field)?;
        if v.bit_len() > bits {
            return Err(format!("'{field}': {v} does not fit in uint{bits}"));
        }
        Ok(v.to::<u128>())
    }

    pub fn u8(&mut self, field: &str) -> Result<u8, String> {
        self.narrow_u64(field, 8).map(|v| v as u8)
    }

    pub fn address(&mut self, field: &str) -> Result<Address, String> {
        match self.next(field)? {
            DynSolValue::Address(a) => Ok(a),
            other => Err(format!("'{field}': expected address, got {other:?}")),
        }
    }

    pub fn bool(&mut self, field: &str) -> Result<bool, String> {
        match self.next(field)? {
            DynSolValue::Bool(b) => Ok(b),
            other => Err(format!("'{field}': expected bool, got {other:?}")),
        }
    }

    pub fn bytes(&mut self, field: &str) -> Result<Vec<u8>, String> {
        match self.next(field)? {
            DynSolValue::Bytes(b) => Ok(b),
            other => Err(format!("'{field}': expected bytes, got {other:?}")),
        }
    }

    pub fn word(&mut self, field: &str) -> Result<B256, String> {
        match self.next(field)? {
            DynSolValue::FixedBytes(w, 32) => Ok(w),
            other => Err(format!("'{field}': expected bytes32, got {other:?}")),
        }
    }

    pub fn bytes4(&mut self, field: &str) -> Result<FixedBytes<4>, String> {
        match self.next(field)? {
            DynSolValue::FixedBytes(w, 4) => Ok(FixedBytes::<4>::from_slice(&w[..4])),
            other => Err(format!("'{field}': expected bytes4, got {other:?}")),
        }
    }

    pub fn uint_array(&mut self, field: &str) -> Result<Vec<U256>, String> {
        into_array(self.next(field)?, field)?
            .into_iter()
            .map(|v| match v {
                DynSolValue::Uint(u, _) => Ok(u),
                other => Err(format!("'{field}': expected uint element, got {other:?}")),
            })
            .collect()
    }

    pub fn address_array(&mut self, field: &str) -> Result<Vec<Address>, String> {
        into_array(self.next(field)?, field)?
            .into_iter()
            .map(|v| match v {
                DynSolValue::Address(a) => Ok(a),
                other => Err(format!("'{field}': expected address element, got {other:?}")),
            })
            .collect()
    }

    /// Fail if the tuple has members nobody read.
    pub fn finish(mut self) -> Result<(), String> {
        match self.values.next() {
            None => Ok(()),
            Some(extra) => Err(format!("unexpected trailing member {extra:?}")),
        }
    }
}

pub(crate) fn into_array(value: DynSolValue, field: &str) -> Result<Vec<DynSolValue>, String> {
    match value {
        DynSolValue::Array(items) => Ok(items),
        other => Err(format!("'{field}': expected array, got {other:?}")),
    }
}

// ─── Encoding helpers ─────────────────────────────────────────────────────────

pub(crate) fn uint256(v: U256) -> DynSolValue {
    DynSolValue::Uint(v, 256)
}

/// `uintN` from a `u64`, failing if the value needs more than `bits` bits.
pub(crate) fn narrow(field: &'static str, v: u64, bits: usize) -> Result<DynSolValue, CodecError> {
    if bits < 64 && v >> bits != 0 {
        return Err(CodecError::ValueOutOfRange { field, bits });
    }
    Ok(DynSolValue::Uint(U256::from(v), bits))
}

pub(crate) fn narrow_u128(
    field: &'static str,
    v: u128,
    bits: usize,
) -> Result<DynSolValue, CodecError> {
    if bits < 128 && v >> bits != 0 {
        return Err(CodecError::ValueOutOfRange { field, bits });
    }
    Ok(DynSolValue::Uint(U256::from(v), bits))
}

pub(crate) fn bytes4(v: FixedBytes<4>) -> DynSolValue {
    DynSolValue::FixedBytes(B256::right_padding_from(v.as_slice()), 4)
}

pub(crate) fn word(v: B256) -> DynSolValue {
    DynSolValue::FixedBytes(v, 32)
}

pub(crate) fn uint_array(values: &[U256]) -> DynSolValue {
    DynSolValue::Array(values.iter().copied().map(uint256).collect())
}

pub(crate) fn address_array(values: &[Address]) -> DynSolValue {
    DynSolValue::Array(values.iter().copied().map(DynSolValue::Address).collect())
}
