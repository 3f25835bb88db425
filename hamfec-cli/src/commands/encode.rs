use anyhow::{Context, Result};
use hamfec_core::{codec::encode_bits, interleave::interleave, wire};
use tracing::info;

use super::bit_string;

/// Codewords and wire payloads for one message
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSummary {
    /// The parsed input, one 4-digit string per block
    pub blocks: Vec<String>,
    /// One 7-digit string per block
    pub codewords: Vec<String>,
    /// One payload per channel, as sent on the wire
    pub channels: Vec<String>,
}

pub fn encode_text(bits: &str) -> Result<EncodeSummary> {
    let bits = wire::parse_bits(bits).context("Input must consist of 0 and 1 characters")?;
    let words = encode_bits(&bits)
        .with_context(|| format!("Cannot split {} bits into 4-bit blocks", bits.len()))?;

    let channels = interleave(&words)
        .iter()
        .map(|c| String::from_utf8_lossy(&wire::encode_channel(c)).into_owned())
        .collect();

    Ok(EncodeSummary {
        blocks: bits.chunks(4).map(bit_string).collect(),
        codewords: words.iter().map(|w| w.to_string()).collect(),
        channels,
    })
}

pub fn execute(bits: &str) -> Result<()> {
    info!("Encoding {} input characters", bits.trim().len());

    let summary = encode_text(bits)?;

    println!("\n=== Codewords ===");
    for (i, (word, data)) in summary.codewords.iter().zip(&summary.blocks).enumerate() {
        println!("Block {:>4}: {} -> {}", i, data, word);
    }

    println!("\n=== Channels ===");
    for (c, payload) in summary.channels.iter().enumerate() {
        println!("Channel {}: {}", c, payload);
    }

    Ok(())
}
