//! Hamming(7,4) block codec
//!
//! Encoding multiplies the data by G; decoding computes the syndrome with H,
//! flips the bit it points at and reads the data back from
//! [`DATA_POSITIONS`].

use crate::constants::{CODE_BITS, DATA_BITS, DATA_POSITIONS, GENERATOR, PARITY_CHECK};
use crate::error::CodecError;
use crate::gf2;
use crate::types::{Codeword, DataBlock, Syndrome};
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::trace;

/// Encode exactly four bits into a codeword
///
/// Fails with [`CodecError::InvalidLength`] unless `data` has four elements.
pub fn encode(data: &[u8]) -> Result<Codeword, CodecError> {
    let block = DataBlock::try_from(data)?;
    Ok(encode_block(&block))
}

/// Encode a validated data block
pub fn encode_block(block: &DataBlock) -> Codeword {
    Codeword::from_array_unchecked(gf2::mat_vec(&GENERATOR, block.bits()))
}

/// Decode exactly seven bits, correcting at most one flipped bit
///
/// Two or more bit errors are not detected; the result is then some other
/// data block, never a panic.
pub fn decode(encoded: &[u8]) -> Result<DataBlock, CodecError> {
    let word = Codeword::try_from(encoded)?;
    Ok(decode_codeword(&word))
}

/// Decode a codeword, correcting at most one flipped bit
pub fn decode_codeword(word: &Codeword) -> DataBlock {
    let corrected = correct(word);
    extract_data(corrected.bits())
}

/// Parity-check a codeword
pub fn syndrome(word: &Codeword) -> Syndrome {
    Syndrome(gf2::mat_vec(&PARITY_CHECK, word.bits()))
}

/// Flip the bit the syndrome points at, if any
pub fn correct(word: &Codeword) -> Codeword {
    match syndrome(word).error_position() {
        Some(pos) => {
            #[cfg(feature = "logging")]
            trace!("Correcting bit {} of {}", pos, word);
            word.with_flipped(pos)
        }
        None => *word,
    }
}

/// Read the data bits out of a full 7-bit vector
pub(crate) fn extract_data(bits: &[u8; CODE_BITS]) -> DataBlock {
    let mut data = [0u8; DATA_BITS];
    for (dst, &pos) in data.iter_mut().zip(DATA_POSITIONS.iter()) {
        *dst = bits[pos];
    }
    DataBlock::from_array_unchecked(data)
}

/// Split a bit sequence into data blocks
///
/// The length must be a multiple of four; nothing is padded or dropped.
pub fn split_blocks(bits: &[u8]) -> Result<Vec<DataBlock>, CodecError> {
    if bits.len() % DATA_BITS != 0 {
        let expected = bits.len().div_ceil(DATA_BITS) * DATA_BITS;
        return Err(CodecError::length("bit stream", expected, bits.len()));
    }
    bits.chunks_exact(DATA_BITS).map(DataBlock::try_from).collect()
}

/// Encode a whole bit sequence, four bits per codeword
pub fn encode_bits(bits: &[u8]) -> Result<Vec<Codeword>, CodecError> {
    Ok(split_blocks(bits)?.iter().map(encode_block).collect())
}

/// Decode a sequence of codewords and concatenate the data bits
pub fn decode_codewords(words: &[Codeword]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * DATA_BITS);
    for word in words {
        out.extend_from_slice(decode_codeword(word).bits());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_vector() {
        let word = encode(&[0, 1, 0, 1]).unwrap();
        assert_eq!(word.bits(), &[0, 1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_decode_corrects_flipped_bit() {
        let data = decode(&[0, 1, 1, 0, 1, 0, 1]).unwrap();
        assert_eq!(data.bits(), &[0, 1, 0, 1]);
    }

    #[test]
    fn test_encode_rejects_wrong_length() {
        assert!(matches!(
            encode(&[1, 0, 1]),
            Err(CodecError::InvalidLength { expected: 4, actual: 3, .. })
        ));
        assert!(matches!(
            encode(&[1, 0, 1, 0, 1]),
            Err(CodecError::InvalidLength { expected: 4, actual: 5, .. })
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        assert!(matches!(
            decode(&[0; 8]),
            Err(CodecError::InvalidLength { expected: 7, actual: 8, .. })
        ));
    }

    #[test]
    fn test_valid_codeword_has_zero_syndrome() {
        for n in 0u8..16 {
            let bits = [n >> 3 & 1, n >> 2 & 1, n >> 1 & 1, n & 1];
            let word = encode(&bits).unwrap();
            assert!(syndrome(&word).is_zero());
        }
    }

    #[test]
    fn test_split_blocks_refuses_partial_block() {
        assert!(split_blocks(&[1, 0, 1, 1, 0]).is_err());
        assert_eq!(split_blocks(&[]).unwrap().len(), 0);
    }

    #[test]
    fn test_stream_round_trip() {
        let bits = [1, 0, 1, 1, 0, 0, 0, 1, 1, 1, 1, 1];
        let words = encode_bits(&bits).unwrap();
        assert_eq!(words.len(), 3);
        assert_eq!(decode_codewords(&words), bits.to_vec());
    }
}
