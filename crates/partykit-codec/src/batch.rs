//! Rayon-powered batch decoding.

use partykit_core::CodecError;
use rayon::prelude::*;

use crate::decode::decode_proposal_data;
use crate::types::ProposalVariant;

/// Decode many `proposalData` blobs in parallel.
///
/// The output is index-aligned with `inputs`; a malformed blob only fails its
/// own slot.
pub fn decode_batch<T>(inputs: &[T]) -> Vec<Result<ProposalVariant, CodecError>>
where
    T: AsRef<[u8]> + Sync,
{
    inputs.par_iter().map(|data| decode_proposal_data(data.as_ref())).collect()
}

/// Like [`decode_batch`], but split into successes and `(index, error)` pairs.
pub fn decode_batch_partitioned<T>(
    inputs: &[T],
) -> (Vec<(usize, ProposalVariant)>, Vec<(usize, CodecError)>)
where
    T: AsRef<[u8]> + Sync,
{
    let mut decoded = Vec::new();
    let mut errors = Vec::new();
    for (idx, result) in decode_batch(inputs).into_iter().enumerate() {
        match result {
            Ok(v) => decoded.push((idx, v)),
            Err(e) => errors.push((idx, e)),
        }
    }
    (decoded, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use crate::types::Distribute;
    use alloy_primitives::U256;

    #[test]
    fn batch_is_index_aligned() {
        let good = encode(&ProposalVariant::Distribute(Distribute::native(U256::from(1u64))))
            .unwrap()
            .to_vec();
        let inputs = vec![good.clone(), vec![0, 0], good, vec![0, 0, 0, 7, 1]];
        let out = decode_batch(&inputs);
        assert_eq!(out.len(), 4);
        assert!(out[0].is_ok());
        assert_eq!(out[1], Err(CodecError::Truncated { len: 2 }));
        assert!(out[2].is_ok());
        assert!(out[3].is_err());

        let (ok, errs) = decode_batch_partitioned(&inputs);
        assert_eq!(ok.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(errs.iter().map(|(i, _)| *i).collect::<Vec<_>>(), vec![1, 3]);
    }
}
