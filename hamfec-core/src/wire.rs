//! Channel payloads on the wire: one ASCII digit per bit, no separator

use crate::constants::{DIGIT_ONE, DIGIT_ZERO};
use crate::error::CodecError;
use alloc::vec::Vec;
use bytes::{BufMut, Bytes, BytesMut};

/// Serialize a channel's bits as `'0'`/`'1'` characters
pub fn encode_channel(bits: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(bits.len());
    for &b in bits {
        buf.put_u8(if b & 1 == 1 { DIGIT_ONE } else { DIGIT_ZERO });
    }
    buf.freeze()
}

/// Parse a channel payload back into bits
pub fn decode_channel(payload: &[u8]) -> Result<Vec<u8>, CodecError> {
    payload
        .iter()
        .map(|&c| match c {
            DIGIT_ZERO => Ok(0),
            DIGIT_ONE => Ok(1),
            other => Err(CodecError::InvalidDigit(other)),
        })
        .collect()
}

/// Parse a line of text such as `"01011100"` into bits
///
/// Leading and trailing whitespace is ignored.
pub fn parse_bits(text: &str) -> Result<Vec<u8>, CodecError> {
    decode_channel(text.trim().as_bytes())
}
