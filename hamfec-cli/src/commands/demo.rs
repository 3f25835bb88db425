use anyhow::Result;
use colored::*;
use hamfec_core::{
    codec::{decode_codeword, encode},
    decode_with_erasures,
    loss::lose_fixed,
    ReceivedWord,
};

use super::make_rng;

/// Walk through a bit flip and a two-packet loss on the block 0101
pub fn execute(seed: Option<u64>) -> Result<()> {
    let original = [0u8, 1, 0, 1];
    let data = hamfec_core::DataBlock::new(original)?;
    println!("Original data:      {}", data);

    let encoded = encode(&original)?;
    println!("Encoded (7 bits):   {}", encoded);

    // Scenario 1: one bit flips in transit
    println!("\n--- Scenario 1: bit flip ---");
    let corrupted = encoded.with_flipped(2);
    println!("Corrupted:          {}", corrupted);
    let decoded = decode_codeword(&corrupted);
    println!("Recovered:          {} {}", decoded, status(decoded == data));

    // Scenario 2: two of the seven positions never arrive
    println!("\n--- Scenario 2: packet loss ---");
    let mut rng = make_rng(seed);
    let slots: Vec<u8> = encoded.bits().to_vec();
    let lossy = lose_fixed(slots, &mut rng)?;
    println!("Lost positions:     {:?}", lossy.erasures.to_vec());

    let mut received = [None; 7];
    for (dst, slot) in received.iter_mut().zip(lossy.channels.iter()) {
        *dst = *slot;
    }
    let received = ReceivedWord(received);
    println!("With losses:        {}", received);

    let outcome = decode_with_erasures(&received, &lossy.erasures)?;
    let recovered = outcome.data_or_zeroed();
    println!("Recovered:          {} {}", recovered, status(recovered == data));

    Ok(())
}

fn status(ok: bool) -> ColoredString {
    if ok {
        "✓".green()
    } else {
        "✗".red()
    }
}
