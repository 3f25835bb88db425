//! Channel interleaving: spread codewords across seven parallel bit channels.
//!
//! Channel `c` carries bit `c` of every codeword in the batch, so losing one
//! channel (one datagram) erases exactly one bit of each codeword instead of
//! whole codewords. That is the situation in which the (7,4) code recovers up
//! to two lost channels.
//!
//! On the receiving side a lost channel is `None`; de-interleaving turns it
//! into an erased slot in every [`ReceivedWord`].

use crate::constants::CHANNEL_COUNT;
use crate::error::CodecError;
use crate::types::{Codeword, ReceivedWord};
use alloc::vec::Vec;

/// The seven bit channels of one batch
pub type Channels = [Vec<u8>; CHANNEL_COUNT];

/// Distribute codewords over seven channels: `channels[c][k] = words[k][c]`
pub fn interleave(words: &[Codeword]) -> Channels {
    let mut out: Channels = core::array::from_fn(|_| Vec::with_capacity(words.len()));
    for word in words {
        for (lane, &bit) in out.iter_mut().zip(word.bits().iter()) {
            lane.push(bit);
        }
    }
    out
}

/// Rebuild every received word of a batch
///
/// `channels` must have seven slots; lost channels are `None`. The block
/// count is taken from the present channels, which must agree on length.
pub fn deinterleave<T: AsRef<[u8]>>(channels: &[Option<T>]) -> Result<Vec<ReceivedWord>, CodecError> {
    let count = block_count(channels)?;
    deinterleave_with_count(channels, count)
}

/// Rebuild every received word of a batch whose block count is already known
///
/// Works even when every channel was lost.
pub fn deinterleave_with_count<T: AsRef<[u8]>>(
    channels: &[Option<T>],
    count: usize,
) -> Result<Vec<ReceivedWord>, CodecError> {
    let lanes = lanes(channels, count)?;
    Ok((0..count).map(|k| word_at(&lanes, k)).collect())
}

/// Rebuild the `k`-th received word of a batch
pub fn deinterleave_at<T: AsRef<[u8]>>(channels: &[Option<T>], k: usize) -> Result<ReceivedWord, CodecError> {
    let count = block_count(channels)?;
    if k >= count {
        return Err(CodecError::length("block index", count, k));
    }
    let lanes = lanes(channels, count)?;
    Ok(word_at(&lanes, k))
}

/// Rebuild codewords from a lossless batch
pub fn deinterleave_codewords(channels: &Channels) -> Result<Vec<Codeword>, CodecError> {
    let slots: Vec<Option<&[u8]>> = channels.iter().map(|c| Some(c.as_slice())).collect();
    let count = channels[0].len();
    deinterleave_with_count(&slots, count)?
        .into_iter()
        .map(|word| word.into_codeword().ok_or(CodecError::AllChannelsErased))
        .collect()
}

/// Number of blocks carried by the present channels
pub fn block_count<T: AsRef<[u8]>>(channels: &[Option<T>]) -> Result<usize, CodecError> {
    check_slots(channels)?;
    channels
        .iter()
        .flatten()
        .map(|c| c.as_ref().len())
        .next()
        .ok_or(CodecError::AllChannelsErased)
}

fn check_slots<T>(channels: &[Option<T>]) -> Result<(), CodecError> {
    if channels.len() != CHANNEL_COUNT {
        return Err(CodecError::length("channel set", CHANNEL_COUNT, channels.len()));
    }
    Ok(())
}

/// Validate lengths and bit values, borrowing each present channel
fn lanes<T: AsRef<[u8]>>(channels: &[Option<T>], count: usize) -> Result<[Option<&[u8]>; CHANNEL_COUNT], CodecError> {
    check_slots(channels)?;
    let mut lanes: [Option<&[u8]>; CHANNEL_COUNT] = [None; CHANNEL_COUNT];
    for (channel, (dst, slot)) in lanes.iter_mut().zip(channels.iter()).enumerate() {
        if let Some(data) = slot {
            let data = data.as_ref();
            if data.len() != count {
                return Err(CodecError::ChannelLengthMismatch {
                    channel,
                    expected: count,
                    actual: data.len(),
                });
            }
            if let Some(&bad) = data.iter().find(|&&b| b > 1) {
                return Err(CodecError::InvalidBit(bad));
            }
            *dst = Some(data);
        }
    }
    Ok(lanes)
}

fn word_at(lanes: &[Option<&[u8]>; CHANNEL_COUNT], k: usize) -> ReceivedWord {
    let mut slots = [None; CHANNEL_COUNT];
    for (slot, lane) in slots.iter_mut().zip(lanes.iter()) {
        *slot = lane.map(|bits| bits[k]);
    }
    ReceivedWord(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_bits;
    use rand::{Rng, SeedableRng};

    fn random_words(n: usize, seed: u64) -> Vec<Codeword> {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let bits: Vec<u8> = (0..n * 4).map(|_| rng.gen_range(0..=1)).collect();
        encode_bits(&bits).unwrap()
    }

    #[test]
    fn round_trip_interleave_deinterleave() {
        for n in [0usize, 1, 50] {
            let words = random_words(n, 123);
            let channels = interleave(&words);
            assert_eq!(channels.len(), 7);
            assert!(channels.iter().all(|c| c.len() == n));
            assert_eq!(deinterleave_codewords(&channels).unwrap(), words);
        }
    }

    #[test]
    fn channel_carries_one_bit_of_each_word() {
        let words = random_words(10, 7);
        let channels = interleave(&words);
        for (k, word) in words.iter().enumerate() {
            for c in 0..7 {
                assert_eq!(channels[c][k], word.bit(c));
            }
        }
    }

    #[test]
    fn lost_channel_becomes_erasure_in_every_word() {
        let words = random_words(5, 9);
        let mut slots: Vec<Option<Vec<u8>>> = interleave(&words).into_iter().map(Some).collect();
        slots[3] = None;

        let received = deinterleave(&slots).unwrap();
        assert_eq!(received.len(), 5);
        for (word, rx) in words.iter().zip(received.iter()) {
            assert_eq!(rx.0[3], None);
            assert_eq!(rx.0[4], Some(word.bit(4)));
        }

        let third = deinterleave_at(&slots, 2).unwrap();
        assert_eq!(third, received[2]);
        assert!(deinterleave_at(&slots, 5).is_err());
    }

    #[test]
    fn rejects_malformed_batches() {
        let short: Vec<Option<Vec<u8>>> = vec![Some(vec![0]); 6];
        assert!(matches!(
            deinterleave(&short),
            Err(CodecError::InvalidLength { expected: 7, actual: 6, .. })
        ));

        let mut uneven: Vec<Option<Vec<u8>>> = vec![Some(vec![0, 1]); 7];
        uneven[4] = Some(vec![1]);
        assert_eq!(
            deinterleave(&uneven),
            Err(CodecError::ChannelLengthMismatch {
                channel: 4,
                expected: 2,
                actual: 1
            })
        );

        let lost: Vec<Option<Vec<u8>>> = vec![None; 7];
        assert_eq!(deinterleave(&lost), Err(CodecError::AllChannelsErased));
        let words = deinterleave_with_count(&lost, 3).unwrap();
        assert!(words.iter().all(|w| w.erasures().len() == 7));
    }
}
