//! Fuzzing entry points for hamfec-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_decode

use hamfec_core::{erasure::decode_received, ReceivedWord};

/// Decode arbitrary bytes, taking the low bit of each as a code bit
pub fn fuzz_decode(data: &[u8]) {
    use hamfec_core::codec::decode;

    let bits: Vec<u8> = data.iter().map(|b| b & 1).collect();
    // Wrong lengths must error, right lengths must decode; never panic
    let _ = decode(&bits);
    for chunk in bits.chunks_exact(7) {
        let _ = decode(chunk);
    }
}

/// Erasure-decode arbitrary bytes: 0/1 are bits, anything else is erased
pub fn fuzz_erasures(data: &[u8]) {
    for chunk in data.chunks_exact(7) {
        let mut slots = [None; 7];
        for (slot, &b) in slots.iter_mut().zip(chunk) {
            *slot = if b <= 1 { Some(b) } else { None };
        }
        let _ = decode_received(&ReceivedWord(slots));
    }
}

/// Feed arbitrary datagrams to the batch assembler and decode complete batches
pub fn fuzz_wire(data: &[u8]) {
    use hamfec_core::batch::{decode_batch, BatchAssembler};

    let mut assembler = BatchAssembler::new();
    for payload in data.split(|&b| b == b'\n') {
        if let Ok(Some(channels)) = assembler.push(payload) {
            let slots: Vec<Option<Vec<u8>>> = channels.into_iter().map(Some).collect();
            let _ = decode_batch(&slots);
        }
    }
}
