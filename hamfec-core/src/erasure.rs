//! Erasure decoding: recover up to two known-missing bits per codeword
//!
//! The known bits give a partial syndrome `H_known · known`. The erased bits
//! must cancel it, i.e. `H_unknown · x = H_known · known (mod 2)`. With at
//! most two unknowns there are at most four candidates for `x`, so they are
//! simply enumerated; the code's minimum distance of 3 makes the solution
//! unique.

use crate::codec::{decode_codeword, extract_data};
use crate::constants::{CODE_BITS, MAX_ERASURES, PARITY_BITS, PARITY_CHECK};
use crate::error::CodecError;
use crate::gf2;
use crate::types::{DataBlock, ErasureSet, ReceivedWord};

#[cfg(feature = "logging")]
use tracing::warn;

/// Outcome of decoding one received word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErasureOutcome {
    /// Data recovered (or decoded with single-error correction if nothing was erased)
    Recovered(DataBlock),
    /// Too many erasures for the code to resolve
    Uncorrectable {
        /// Number of erased positions in the word.
        erased: usize,
    },
}

impl ErasureOutcome {
    /// Recovered data, if any
    pub fn data(&self) -> Option<DataBlock> {
        match self {
            ErasureOutcome::Recovered(block) => Some(*block),
            ErasureOutcome::Uncorrectable { .. } => None,
        }
    }

    /// Recovered data, or the all-zero block when the word was uncorrectable
    pub fn data_or_zeroed(&self) -> DataBlock {
        self.data().unwrap_or(DataBlock::ZERO)
    }

    /// True when data was recovered
    pub fn is_recovered(&self) -> bool {
        matches!(self, ErasureOutcome::Recovered(_))
    }
}

/// Decode a received word whose erased slots are listed in `erasures`
///
/// * The `None` slots of `word` must be exactly the positions in `erasures`,
///   otherwise [`CodecError::ErasureMismatch`] is returned.
/// * Present slots must hold 0 or 1, otherwise [`CodecError::InvalidBit`].
/// * More than two erasures yield [`ErasureOutcome::Uncorrectable`].
/// * With no erasures the word goes through the single-error decoder.
pub fn decode_with_erasures(
    word: &ReceivedWord,
    erasures: &ErasureSet,
) -> Result<ErasureOutcome, CodecError> {
    check_markers(word, erasures)?;

    if erasures.len() > MAX_ERASURES {
        #[cfg(feature = "logging")]
        warn!("Cannot recover word {} with {} erasures", word, erasures.len());
        return Ok(ErasureOutcome::Uncorrectable {
            erased: erasures.len(),
        });
    }

    let mut bits = [0u8; CODE_BITS];
    for (dst, slot) in bits.iter_mut().zip(word.0.iter()) {
        *dst = slot.unwrap_or(0);
    }

    if erasures.is_empty() {
        let codeword = crate::types::Codeword::from_array_unchecked(bits);
        return Ok(ErasureOutcome::Recovered(decode_codeword(&codeword)));
    }

    if !fill_erasures(&mut bits, erasures) {
        #[cfg(feature = "logging")]
        warn!(
            "No consistent assignment for erasures {:?} in {}; leaving them at 0",
            erasures.to_vec(),
            word
        );
    }

    Ok(ErasureOutcome::Recovered(extract_data(&bits)))
}

/// Decode a received word, deriving the erasure set from its markers
pub fn decode_received(word: &ReceivedWord) -> ErasureOutcome {
    let erasures = word.erasures();
    match decode_with_erasures(word, &erasures) {
        Ok(outcome) => outcome,
        // markers and set come from the same word, so only a non-bit slot fails
        Err(_) => ErasureOutcome::Uncorrectable {
            erased: erasures.len(),
        },
    }
}

fn check_markers(word: &ReceivedWord, erasures: &ErasureSet) -> Result<(), CodecError> {
    for (position, slot) in word.0.iter().enumerate() {
        match *slot {
            Some(bit) if bit > 1 => return Err(CodecError::InvalidBit(bit)),
            _ if slot.is_none() != erasures.contains(position) => {
                return Err(CodecError::ErasureMismatch { position });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Overwrite the erased positions of `bits` (currently 0) with the values
/// that zero the syndrome. Returns false, leaving them at 0, if none does.
fn fill_erasures(bits: &mut [u8; CODE_BITS], erasures: &ErasureSet) -> bool {
    // Erased slots hold 0 here, so H · bits is exactly the known-bit syndrome
    let target = gf2::mat_vec(&PARITY_CHECK, bits);

    let mut unknown = [0usize; MAX_ERASURES];
    let mut k = 0;
    for pos in erasures.iter().take(MAX_ERASURES) {
        unknown[k] = pos;
        k += 1;
    }
    let unknown = &unknown[..k];

    match solve(unknown, &target) {
        Some(values) => {
            for (i, &pos) in unknown.iter().enumerate() {
                bits[pos] = (values >> i) & 1;
            }
            true
        }
        None => false,
    }
}

/// Find the first candidate `x` (bit `i` = value of `unknown[i]`) with
/// `H_unknown · x == target`
fn solve(unknown: &[usize], target: &[u8; PARITY_BITS]) -> Option<u8> {
    let columns: [[u8; PARITY_BITS]; MAX_ERASURES] = {
        let mut cols = [[0u8; PARITY_BITS]; MAX_ERASURES];
        for (col, &pos) in cols.iter_mut().zip(unknown.iter()) {
            *col = gf2::column(&PARITY_CHECK, pos);
        }
        cols
    };

    (0u8..1 << unknown.len()).find(|&candidate| {
        let mut acc = [0u8; PARITY_BITS];
        for (i, col) in columns.iter().take(unknown.len()).enumerate() {
            if (candidate >> i) & 1 == 1 {
                gf2::add_assign(&mut acc, col);
            }
        }
        &acc == target
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    fn erase(bits: [u8; 7], positions: &[usize]) -> (ReceivedWord, ErasureSet) {
        let word = crate::types::Codeword::new(bits).unwrap();
        let set = ErasureSet::from_indices(positions).unwrap();
        (ReceivedWord::from_codeword(&word, &set), set)
    }

    #[test]
    fn test_recovers_two_erasures() {
        let (word, set) = erase([0, 1, 0, 0, 1, 0, 1], &[1, 3]);
        let outcome = decode_with_erasures(&word, &set).unwrap();
        assert_eq!(outcome.data().unwrap().bits(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_recovers_erased_data_bits() {
        let codeword = encode(&[1, 1, 1, 0]).unwrap();
        let (word, set) = erase(*codeword.bits(), &[4, 6]);
        let outcome = decode_with_erasures(&word, &set).unwrap();
        assert_eq!(outcome, ErasureOutcome::Recovered(DataBlock::new([1, 1, 1, 0]).unwrap()));
    }

    #[test]
    fn test_three_erasures_are_uncorrectable() {
        let (word, set) = erase([0, 1, 0, 0, 1, 0, 1], &[0, 2, 5]);
        let outcome = decode_with_erasures(&word, &set).unwrap();
        assert_eq!(outcome, ErasureOutcome::Uncorrectable { erased: 3 });
        assert_eq!(outcome.data_or_zeroed(), DataBlock::ZERO);
        assert!(!outcome.is_recovered());
    }

    #[test]
    fn test_no_erasures_corrects_single_error() {
        let (word, set) = erase([0, 1, 1, 0, 1, 0, 1], &[]);
        let outcome = decode_with_erasures(&word, &set).unwrap();
        assert_eq!(outcome.data().unwrap().bits(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_marker_mismatch_fails_fast() {
        let (word, _) = erase([0, 1, 0, 0, 1, 0, 1], &[1, 3]);
        let wrong = ErasureSet::from_indices(&[1, 4]).unwrap();
        assert_eq!(
            decode_with_erasures(&word, &wrong),
            Err(CodecError::ErasureMismatch { position: 3 })
        );
    }

    #[test]
    fn test_decode_received_uses_markers() {
        let (word, _) = erase([0, 1, 0, 0, 1, 0, 1], &[0, 6]);
        assert_eq!(decode_received(&word).data().unwrap().bits(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_rejects_non_bit_slots() {
        let word = ReceivedWord([Some(0), Some(1), Some(2), Some(0), Some(1), Some(0), Some(1)]);
        assert_eq!(
            decode_with_erasures(&word, &ErasureSet::empty()),
            Err(CodecError::InvalidBit(2))
        );

        let word = ReceivedWord([Some(0), None, Some(0), None, Some(5), Some(0), Some(1)]);
        let set = ErasureSet::from_indices(&[1, 3]).unwrap();
        assert_eq!(
            decode_with_erasures(&word, &set),
            Err(CodecError::InvalidBit(5))
        );
    }

    #[test]
    fn test_inconsistent_erasure_leaves_placeholder() {
        // Known bits give syndrome [1,1,0]; column 1 of H is [0,1,0], so
        // neither value of the erased bit clears it.
        let word = ReceivedWord([Some(1), None, Some(0), Some(0), Some(1), Some(0), Some(1)]);
        let set = ErasureSet::from_indices(&[1]).unwrap();

        let mut bits = [1, 0, 0, 0, 1, 0, 1];
        assert_eq!(solve(&[1], &gf2::mat_vec(&PARITY_CHECK, &bits)), None);
        assert!(!fill_erasures(&mut bits, &set));
        assert_eq!(bits[1], 0);

        let outcome = decode_with_erasures(&word, &set).unwrap();
        assert_eq!(outcome, ErasureOutcome::Recovered(DataBlock::new([0, 1, 0, 1]).unwrap()));
    }
}
