//! Core value types: data blocks, codewords, syndromes and erasure bookkeeping

use crate::constants::{CODE_BITS, DATA_BITS, PARITY_BITS, SYNDROME_WEIGHTS};
use crate::error::CodecError;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

fn check_bits(bits: &[u8]) -> Result<(), CodecError> {
    match bits.iter().find(|&&b| b > 1) {
        Some(&bad) => Err(CodecError::InvalidBit(bad)),
        None => Ok(()),
    }
}

/// Four data bits, the input unit of the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DataBlock([u8; DATA_BITS]);

impl DataBlock {
    /// The all-zero block, also the degraded output for uncorrectable words
    pub const ZERO: DataBlock = DataBlock([0; DATA_BITS]);

    /// Create a block, rejecting values other than 0/1
    pub fn new(bits: [u8; DATA_BITS]) -> Result<Self, CodecError> {
        check_bits(&bits)?;
        Ok(Self(bits))
    }

    /// Raw bits
    pub const fn bits(&self) -> &[u8; DATA_BITS] {
        &self.0
    }

    pub(crate) const fn from_array_unchecked(bits: [u8; DATA_BITS]) -> Self {
        Self(bits)
    }
}

impl TryFrom<&[u8]> for DataBlock {
    type Error = CodecError;

    fn try_from(bits: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; DATA_BITS] = bits
            .try_into()
            .map_err(|_| CodecError::length("data block", DATA_BITS, bits.len()))?;
        Self::new(arr)
    }
}

impl From<DataBlock> for [u8; DATA_BITS] {
    fn from(block: DataBlock) -> Self {
        block.0
    }
}

impl fmt::Display for DataBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bits(f, &self.0)
    }
}

/// Seven code bits produced by encoding one [`DataBlock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Codeword([u8; CODE_BITS]);

impl Codeword {
    /// Create a codeword, rejecting values other than 0/1
    ///
    /// Any 7-bit vector is accepted; it need not be a valid codeword.
    pub fn new(bits: [u8; CODE_BITS]) -> Result<Self, CodecError> {
        check_bits(&bits)?;
        Ok(Self(bits))
    }

    /// Raw bits
    pub const fn bits(&self) -> &[u8; CODE_BITS] {
        &self.0
    }

    /// Bit at position `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`.
    pub fn bit(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Return a copy with the bit at `index` inverted
    ///
    /// # Panics
    ///
    /// Panics if `index >= 7`.
    pub fn with_flipped(mut self, index: usize) -> Self {
        self.0[index] ^= 1;
        self
    }

    pub(crate) const fn from_array_unchecked(bits: [u8; CODE_BITS]) -> Self {
        Self(bits)
    }
}

impl TryFrom<&[u8]> for Codeword {
    type Error = CodecError;

    fn try_from(bits: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; CODE_BITS] = bits
            .try_into()
            .map_err(|_| CodecError::length("codeword", CODE_BITS, bits.len()))?;
        Self::new(arr)
    }
}

impl From<Codeword> for [u8; CODE_BITS] {
    fn from(word: Codeword) -> Self {
        word.0
    }
}

impl fmt::Display for Codeword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_bits(f, &self.0)
    }
}

fn fmt_bits(f: &mut fmt::Formatter<'_>, bits: &[u8]) -> fmt::Result {
    for &b in bits {
        write!(f, "{}", b)?;
    }
    Ok(())
}

/// Result of applying the parity-check matrix to a codeword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syndrome(pub [u8; PARITY_BITS]);

impl Syndrome {
    /// True when the word is consistent with the code
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// 1-based bit position indicated by the syndrome (0 means no error)
    pub fn weighted(&self) -> usize {
        self.0
            .iter()
            .zip(SYNDROME_WEIGHTS.iter())
            .map(|(&s, &w)| s as usize * w)
            .sum()
    }

    /// 0-based position of the single bit error, if any
    pub fn error_position(&self) -> Option<usize> {
        self.weighted().checked_sub(1)
    }
}

/// Set of erased codeword positions (channels), stored as a bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErasureSet(u8);

impl ErasureSet {
    /// No erasures
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build a set from channel indices; duplicates collapse
    pub fn from_indices(indices: &[usize]) -> Result<Self, CodecError> {
        let mut set = Self::empty();
        for &i in indices {
            set.insert(i)?;
        }
        Ok(set)
    }

    /// Mark a position as erased
    pub fn insert(&mut self, index: usize) -> Result<(), CodecError> {
        if index >= CODE_BITS {
            return Err(CodecError::PositionOutOfRange(index));
        }
        self.0 |= 1 << index;
        Ok(())
    }

    /// Is `index` erased?
    pub const fn contains(&self, index: usize) -> bool {
        index < CODE_BITS && (self.0 >> index) & 1 == 1
    }

    /// Number of erased positions
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True when nothing is erased
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when the code can recover every word with these erasures
    pub const fn is_correctable(&self) -> bool {
        self.len() <= crate::constants::MAX_ERASURES
    }

    /// Erased positions in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CODE_BITS).filter(move |&i| self.contains(i))
    }

    /// Erased positions in ascending order, collected
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

/// A codeword as seen by the receiver: `None` marks an erased slot
///
/// An erased slot is never the same thing as a received zero. Present slots
/// must hold 0 or 1; the erasure decoder rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceivedWord(pub [Option<u8>; CODE_BITS]);

impl ReceivedWord {
    /// Every slot erased
    pub const fn all_erased() -> Self {
        Self([None; CODE_BITS])
    }

    /// Take a codeword and erase the positions in `erasures`
    pub fn from_codeword(word: &Codeword, erasures: &ErasureSet) -> Self {
        let mut slots = [None; CODE_BITS];
        for (i, slot) in slots.iter_mut().enumerate() {
            if !erasures.contains(i) {
                *slot = Some(word.bit(i));
            }
        }
        Self(slots)
    }

    /// Positions currently marked erased
    pub fn erasures(&self) -> ErasureSet {
        let mut mask = 0u8;
        for (i, slot) in self.0.iter().enumerate() {
            if slot.is_none() {
                mask |= 1 << i;
            }
        }
        ErasureSet(mask)
    }

    /// The codeword, if no slot is erased
    pub fn into_codeword(self) -> Option<Codeword> {
        let mut bits = [0u8; CODE_BITS];
        for (dst, slot) in bits.iter_mut().zip(self.0.iter()) {
            *dst = (*slot)?;
        }
        Some(Codeword(bits))
    }
}

impl From<Codeword> for ReceivedWord {
    fn from(word: Codeword) -> Self {
        Self::from_codeword(&word, &ErasureSet::empty())
    }
}

impl fmt::Display for ReceivedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            match slot {
                Some(b) => write!(f, "{}", b)?,
                None => write!(f, "?")?,
            }
        }
        Ok(())
    }
}
