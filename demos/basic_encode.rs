//! Basic example of encoding and decoding a single block

use hamfec_core::codec::{decode, encode, syndrome};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("hamfec Basic Encoding Example\n");

    let data = [0u8, 1, 0, 1];
    let word = encode(&data)?;
    println!("Data:     {:?}", data);
    println!("Codeword: {}", word);

    // Flip every position in turn; each is corrected
    for pos in 0..7 {
        let corrupted = word.with_flipped(pos);
        let s = syndrome(&corrupted);
        let decoded = decode(corrupted.bits())?;
        println!(
            "Flip bit {}: {} -> syndrome {:?} -> {}",
            pos, corrupted, s.0, decoded
        );
        assert_eq!(decoded.bits(), &data);
    }

    println!("\n✓ Every single-bit error corrected");
    Ok(())
}
