//! Constants and limits for the hamfec code and wire format
//!
//! G and H are part of the wire contract: two peers only interoperate if they
//! use byte-identical matrices.

/// Number of data bits per block
pub const DATA_BITS: usize = 4;

/// Number of code bits per codeword
pub const CODE_BITS: usize = 7;

/// Number of parity-check rows (syndrome length)
pub const PARITY_BITS: usize = CODE_BITS - DATA_BITS;

/// Number of interleaved channels per batch (one per codeword bit)
pub const CHANNEL_COUNT: usize = CODE_BITS;

/// Maximum number of erased positions the code can recover (minimum distance 3)
pub const MAX_ERASURES: usize = 2;

/// Generator matrix G (7x4): codeword = (G · data) mod 2
pub const GENERATOR: [[u8; DATA_BITS]; CODE_BITS] = [
    [1, 1, 0, 1],
    [1, 0, 1, 1],
    [1, 0, 0, 0],
    [0, 1, 1, 1],
    [0, 1, 0, 0],
    [0, 0, 1, 0],
    [0, 0, 0, 1],
];

/// Parity-check matrix H (3x7): syndrome = (H · codeword) mod 2
///
/// Column `j` holds the binary digits of `j + 1`, least significant bit in
/// row 0, so a syndrome read as `s0 + 2*s1 + 4*s2` is the 1-based position of
/// a single flipped bit.
pub const PARITY_CHECK: [[u8; CODE_BITS]; PARITY_BITS] = [
    [1, 0, 1, 0, 1, 0, 1],
    [0, 1, 1, 0, 0, 1, 1],
    [0, 0, 0, 1, 1, 1, 1],
];

/// Codeword indices carrying the data bits (rows of G forming the identity)
pub const DATA_POSITIONS: [usize; DATA_BITS] = [2, 4, 5, 6];

/// Weights applied to the syndrome bits to obtain the 1-based error position
pub const SYNDROME_WEIGHTS: [usize; PARITY_BITS] = [1, 2, 4];

/// Datagram payload that ends a session
pub const STOP_SENTINEL: &[u8] = b"stop";

/// Default UDP port for the sender and receiver
pub const DEFAULT_PORT: u16 = 5005;

/// Largest datagram the receiver reads (one ASCII digit per block)
pub const MAX_DATAGRAM_SIZE: usize = 1024;

/// Wire digit for a zero bit
pub const DIGIT_ZERO: u8 = b'0';

/// Wire digit for a one bit
pub const DIGIT_ONE: u8 = b'1';
