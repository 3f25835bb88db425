//! Batch-level transmit and receive helpers
//!
//! A batch is one message: its bits are encoded, interleaved into seven
//! channels, sent as seven payloads, and decoded together once all seven
//! slots are accounted for. Decoding never runs on a partial batch.

use crate::codec::encode_bits;
use crate::constants::{CHANNEL_COUNT, DATA_BITS};
use crate::erasure::{decode_with_erasures, ErasureOutcome};
use crate::error::CodecError;
use crate::interleave::{block_count, deinterleave_with_count, interleave, Channels};
use crate::types::ErasureSet;
use crate::wire;
use alloc::vec::Vec;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Encode a message and interleave it into seven channels
pub fn encode_message(bits: &[u8]) -> Result<Channels, CodecError> {
    let words = encode_bits(bits)?;
    Ok(interleave(&words))
}

/// Encode a message into the seven wire payloads, in channel order
pub fn encode_message_wire(bits: &[u8]) -> Result<Vec<Bytes>, CodecError> {
    Ok(encode_message(bits)?
        .iter()
        .map(|c| wire::encode_channel(c))
        .collect())
}

/// Result of decoding one batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Decoded bits; uncorrectable blocks contribute four zeros
    pub data: Vec<u8>,

    /// Number of blocks in the batch
    pub blocks: usize,

    /// Blocks whose data was recovered
    pub recovered_blocks: usize,

    /// Blocks that had too many erasures and were zero-filled
    pub uncorrectable_blocks: usize,

    /// Lost channel indices
    pub erased_channels: Vec<usize>,
}

impl BatchReport {
    /// Share of blocks recovered, as a percentage
    pub fn recovery_rate(&self) -> f64 {
        if self.blocks == 0 {
            0.0
        } else {
            (self.recovered_blocks as f64 / self.blocks as f64) * 100.0
        }
    }

    /// True when no block had to be zero-filled
    pub fn is_complete(&self) -> bool {
        self.uncorrectable_blocks == 0
    }
}

/// Decode a batch of seven channel slots (`None` = lost)
///
/// The block count comes from the present channels; see
/// [`decode_batch_with_count`] when every channel may be missing.
pub fn decode_batch<T: AsRef<[u8]>>(channels: &[Option<T>]) -> Result<BatchReport, CodecError> {
    let count = block_count(channels)?;
    decode_batch_with_count(channels, count)
}

/// Decode a batch whose block count is known to the caller
pub fn decode_batch_with_count<T: AsRef<[u8]>>(
    channels: &[Option<T>],
    count: usize,
) -> Result<BatchReport, CodecError> {
    let words = deinterleave_with_count(channels, count)?;

    let mut erasures = ErasureSet::empty();
    for (i, slot) in channels.iter().enumerate() {
        if slot.is_none() {
            erasures.insert(i)?;
        }
    }

    #[cfg(feature = "logging")]
    debug!(
        "Decoding batch of {} blocks with erased channels {:?}",
        count,
        erasures.to_vec()
    );

    let mut report = BatchReport {
        data: Vec::with_capacity(count * DATA_BITS),
        blocks: count,
        erased_channels: erasures.to_vec(),
        ..Default::default()
    };

    for word in &words {
        let outcome = decode_with_erasures(word, &erasures)?;
        match outcome {
            ErasureOutcome::Recovered(_) => report.recovered_blocks += 1,
            ErasureOutcome::Uncorrectable { .. } => report.uncorrectable_blocks += 1,
        }
        report.data.extend_from_slice(outcome.data_or_zeroed().bits());
    }

    if report.uncorrectable_blocks > 0 {
        #[cfg(feature = "logging")]
        warn!(
            "{} of {} blocks uncorrectable ({} channels lost)",
            report.uncorrectable_blocks,
            count,
            erasures.len()
        );
    }

    Ok(report)
}

/// Collects channel payloads until a full batch of seven has arrived
///
/// The assembler resets itself each time it hands out a batch.
#[derive(Debug, Default)]
pub struct BatchAssembler {
    channels: Vec<Vec<u8>>,
}

impl BatchAssembler {
    /// Create an empty assembler
    pub fn new() -> Self {
        Self {
            channels: Vec::with_capacity(CHANNEL_COUNT),
        }
    }

    /// Add one wire payload
    ///
    /// Returns the seven channels once the seventh payload arrives. A payload
    /// that is not a digit string is rejected and does not count toward the
    /// batch.
    pub fn push(&mut self, payload: &[u8]) -> Result<Option<Vec<Vec<u8>>>, CodecError> {
        let bits = wire::decode_channel(payload)?;
        self.channels.push(bits);

        #[cfg(feature = "logging")]
        debug!(
            "Received channel {} ({} bits)",
            self.channels.len(),
            payload.len()
        );

        if self.channels.len() == CHANNEL_COUNT {
            let batch = core::mem::replace(&mut self.channels, Vec::with_capacity(CHANNEL_COUNT));
            return Ok(Some(batch));
        }
        Ok(None)
    }

    /// Number of payloads buffered for the current batch
    pub fn pending(&self) -> usize {
        self.channels.len()
    }

    /// Drop any partial batch
    pub fn reset(&mut self) {
        self.channels.clear();
    }
}
