use anyhow::{bail, Result};
use colored::*;
use hamfec_core::{
    codec::syndrome, constants::CODE_BITS, decode_with_erasures, ErasureOutcome, ReceivedWord,
};
use tracing::info;

/// Parse a 7-character word; `?` or `_` marks an erased position
pub fn parse_word(text: &str) -> Result<ReceivedWord> {
    let text = text.trim();
    if text.chars().count() != CODE_BITS {
        bail!(
            "Word must have exactly {} positions, got {}",
            CODE_BITS,
            text.chars().count()
        );
    }

    let mut slots = [None; CODE_BITS];
    for (slot, ch) in slots.iter_mut().zip(text.chars()) {
        *slot = match ch {
            '0' => Some(0),
            '1' => Some(1),
            '?' | '_' => None,
            other => bail!("Invalid character {:?} in word", other),
        };
    }
    Ok(ReceivedWord(slots))
}

/// Decode a word given as text, with erasure recovery if it has erased slots
pub fn decode_word(text: &str) -> Result<ErasureOutcome> {
    decode_parsed(&parse_word(text)?)
}

fn decode_parsed(received: &ReceivedWord) -> Result<ErasureOutcome> {
    Ok(decode_with_erasures(received, &received.erasures())?)
}

pub fn execute(word: &str) -> Result<()> {
    let received = parse_word(word)?;
    let erasures = received.erasures();
    info!("Decoding {} ({} erased positions)", received, erasures.len());

    println!("\n=== Decode ===");
    println!("Received:           {}", received);

    if let Some(codeword) = received.into_codeword() {
        let s = syndrome(&codeword);
        match s.error_position() {
            Some(pos) => println!("Corrected bit:      {}", pos),
            None => println!("Syndrome:           zero"),
        }
    } else {
        println!("Erased positions:   {:?}", erasures.to_vec());
    }

    match decode_parsed(&received)? {
        ErasureOutcome::Recovered(data) => {
            println!("{} Data:             {}", "✓".green(), data);
        }
        outcome @ ErasureOutcome::Uncorrectable { erased } => {
            println!(
                "{} {} erasures cannot be recovered; degraded output {}",
                "✗".red(),
                erased,
                outcome.data_or_zeroed()
            );
        }
    }

    Ok(())
}
