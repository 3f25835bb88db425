//! Property-based tests using proptest

use hamfec_core::{
    batch::{decode_batch, encode_message},
    codec::{decode, decode_codeword, encode, encode_bits},
    erasure::{decode_with_erasures, ErasureOutcome},
    interleave::{deinterleave_codewords, interleave},
    loss::{lose_fixed, lose_probabilistic},
    types::{ErasureSet, ReceivedWord},
    wire,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bits(len: impl Into<prop::collection::SizeRange>) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=1, len)
}

fn message() -> impl Strategy<Value = Vec<u8>> {
    (0usize..64).prop_flat_map(|blocks| bits(blocks * 4))
}

proptest! {
    #[test]
    fn prop_single_error_corrected(data in bits(4), pos in 0usize..7) {
        let word = encode(&data).unwrap();
        let decoded = decode_codeword(&word.with_flipped(pos));
        prop_assert_eq!(decoded.bits().to_vec(), data);
    }

    #[test]
    fn prop_decode_never_panics(data in prop::collection::vec(0u8..=1, 0..16)) {
        // Should either succeed or return an error, never panic
        let result = decode(&data);
        prop_assert_eq!(result.is_ok(), data.len() == 7);
    }

    #[test]
    fn prop_interleave_round_trip(data in message()) {
        let words = encode_bits(&data).unwrap();
        let channels = interleave(&words);
        prop_assert_eq!(deinterleave_codewords(&channels).unwrap(), words);
    }

    #[test]
    fn prop_up_to_two_erasures_recovered(
        data in bits(4),
        positions in prop::collection::btree_set(0usize..7, 0..=2)
    ) {
        let positions: Vec<usize> = positions.into_iter().collect();
        let word = encode(&data).unwrap();
        let set = ErasureSet::from_indices(&positions).unwrap();
        let received = ReceivedWord::from_codeword(&word, &set);
        let outcome = decode_with_erasures(&received, &set).unwrap();
        prop_assert_eq!(outcome.data().map(|b| b.bits().to_vec()), Some(data));
    }

    #[test]
    fn prop_too_many_erasures_never_raise(
        data in bits(4),
        positions in prop::collection::btree_set(0usize..7, 3..=7)
    ) {
        let positions: Vec<usize> = positions.into_iter().collect();
        let word = encode(&data).unwrap();
        let set = ErasureSet::from_indices(&positions).unwrap();
        let received = ReceivedWord::from_codeword(&word, &set);
        let outcome = decode_with_erasures(&received, &set).unwrap();
        prop_assert_eq!(outcome, ErasureOutcome::Uncorrectable { erased: positions.len() });
    }

    #[test]
    fn prop_fixed_loss_always_recoverable(data in message(), seed in any::<u64>()) {
        prop_assume!(!data.is_empty());
        let mut rng = StdRng::seed_from_u64(seed);
        let channels = encode_message(&data).unwrap();
        let lossy = lose_fixed(channels.to_vec(), &mut rng).unwrap();
        let lost = lossy.erasures.to_vec();
        prop_assert_eq!(lost.len(), 2);
        prop_assert!(lost[0] < lost[1]);
        prop_assert_eq!(decode_batch(&lossy.channels).unwrap().data, data);
    }

    #[test]
    fn prop_probabilistic_loss_matches_erasures(p in 0.0f64..=1.0, seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let channels: Vec<u8> = (0..7).collect();
        let lossy = lose_probabilistic(channels, p, &mut rng).unwrap();
        for (i, slot) in lossy.channels.iter().enumerate() {
            prop_assert_eq!(slot.is_none(), lossy.erasures.contains(i));
        }
    }

    #[test]
    fn prop_wire_decode_never_panics(payload in prop::collection::vec(any::<u8>(), 0..256)) {
        let valid = payload.iter().all(|&c| c == b'0' || c == b'1');
        prop_assert_eq!(wire::decode_channel(&payload).is_ok(), valid);
    }
}
