//! Error types for hamfec operations

use alloc::string::String;

/// Errors that can occur while encoding, interleaving or decoding
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// Input has the wrong number of elements
    #[cfg_attr(feature = "std", error("Invalid {what} length: expected {expected}, got {actual}"))]
    InvalidLength {
        /// What was being measured (e.g. "data block", "channel set").
        what: &'static str,
        /// The required length.
        expected: usize,
        /// The length actually supplied.
        actual: usize,
    },

    /// A bit value other than 0 or 1
    #[cfg_attr(feature = "std", error("Invalid bit value: {0} (expected 0 or 1)"))]
    InvalidBit(u8),

    /// A wire or text byte other than '0' or '1'
    #[cfg_attr(feature = "std", error("Invalid bit digit: {0:#04x}"))]
    InvalidDigit(u8),

    /// Erasure index outside the codeword
    #[cfg_attr(feature = "std", error("Erasure position {0} is outside the codeword"))]
    PositionOutOfRange(usize),

    /// Erasure markers in a received word disagree with the erasure set
    #[cfg_attr(feature = "std", error("Erasure marker mismatch at position {position}"))]
    ErasureMismatch {
        /// First codeword position where marker and set disagree.
        position: usize,
    },

    /// Present channels carry different numbers of bits
    #[cfg_attr(feature = "std", error("Channel {channel} has {actual} bits, expected {expected}"))]
    ChannelLengthMismatch {
        /// Index of the offending channel.
        channel: usize,
        /// Length of the first present channel.
        expected: usize,
        /// Length of the offending channel.
        actual: usize,
    },

    /// Every channel of a batch was lost, so the block count is unknown
    #[cfg_attr(feature = "std", error("All channels erased"))]
    AllChannelsErased,

    /// Loss probability outside [0, 1]
    #[cfg_attr(feature = "std", error("Loss probability {0} is outside [0, 1]"))]
    InvalidProbability(f64),

    /// IO error during transport
    #[cfg_attr(feature = "std", error("IO error: {0}"))]
    Io(String),
}

impl CodecError {
    pub(crate) const fn length(what: &'static str, expected: usize, actual: usize) -> Self {
        CodecError::InvalidLength {
            what,
            expected,
            actual,
        }
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}
