//! Example demonstrating recovery from lost channels

use hamfec_core::{
    batch::{decode_batch, encode_message},
    loss::lose_fixed,
    simulation::random_bits,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("hamfec Lossy Channel Example\n");
    let mut rng = StdRng::seed_from_u64(2024);

    // Step 1: Encode a 64-bit message into seven channels
    let message = random_bits(64, &mut rng);
    let channels = encode_message(&message)?;
    println!("Step 1: {} bits -> 7 channels of {} bits", message.len(), channels[0].len());

    // Step 2: Lose two channels
    let lossy = lose_fixed(channels.to_vec(), &mut rng)?;
    println!("Step 2: lost channels {:?}", lossy.erasures.to_vec());

    // Step 3: Decode what is left
    let report = decode_batch(&lossy.channels)?;
    println!("Step 3: recovered {}/{} blocks", report.recovered_blocks, report.blocks);

    assert_eq!(report.data, message);
    println!("\n✓ Message recovered despite losing 2 of 7 channels");
    Ok(())
}
