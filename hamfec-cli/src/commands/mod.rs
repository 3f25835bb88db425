pub mod decode;
pub mod demo;
pub mod encode;
pub mod receive;
pub mod send;
pub mod simulate;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded RNG when a seed is given, OS-seeded otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Render bits as a digit string
pub fn bit_string(bits: &[u8]) -> String {
    bits.iter().map(|b| char::from(b'0' + b)).collect()
}
