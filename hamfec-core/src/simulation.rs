//! Loss-rate sweep: how much of a message survives a given channel loss
//! probability.
//!
//! One trial encodes a random message into a single batch, loses each of the
//! seven channels independently with probability `p`, decodes, and counts the
//! data bits of blocks that came back exactly right. A sweep repeats this
//! over a grid of probabilities and averages over several trials. Every block
//! of a batch shares the same lost channels, so a trial recovers either all
//! blocks or only those that happen to be all zeros.

use crate::batch::decode_batch_with_count;
use crate::constants::{CHANNEL_COUNT, DATA_BITS, MAX_ERASURES};
use crate::error::CodecError;
use crate::interleave::Channels;
use crate::loss::lose_probabilistic;
use alloc::vec::Vec;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::debug;

/// Fraction of lost channels beyond which recovery is impossible (2/7)
pub const THEORETICAL_LOSS_LIMIT: f64 = MAX_ERASURES as f64 / CHANNEL_COUNT as f64;

/// Parameters of a sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Message length in bits (a multiple of four)
    pub sequence_len: usize,
    /// Trials averaged per probability
    pub trials: usize,
    /// Number of evenly spaced probabilities from 0.0 to 1.0 inclusive
    pub steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            sequence_len: 4000,
            trials: 10,
            steps: 21,
        }
    }
}

/// Outcome of one simulated transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Bits in the original message
    pub total_bits: usize,
    /// Bits belonging to blocks decoded exactly
    pub recovered_bits: usize,
    /// Channels lost in this trial
    pub lost_channels: usize,
}

impl TrialResult {
    /// Recovered share in percent (0 for an empty message)
    pub fn recovery_percent(&self) -> f64 {
        if self.total_bits == 0 {
            0.0
        } else {
            (self.recovered_bits as f64 / self.total_bits as f64) * 100.0
        }
    }
}

/// Average recovery for one loss probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Per-channel loss probability
    pub p_loss: f64,
    /// Mean recovered share over the trials, in percent
    pub recovery_percent: f64,
}

/// `steps` evenly spaced probabilities from 0.0 to 1.0 inclusive
pub fn probability_grid(steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => alloc::vec![0.0],
        n => (0..n).map(|i| i as f64 / (n - 1) as f64).collect(),
    }
}

/// Uniformly random bits
pub fn random_bits<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..=1)).collect()
}

/// Encode, lose, decode and score one message
pub fn simulate_transmission<R: Rng + ?Sized>(
    data: &[u8],
    p_loss: f64,
    rng: &mut R,
) -> Result<TrialResult, CodecError> {
    let channels: Channels = crate::batch::encode_message(data)?;
    let count = data.len() / DATA_BITS;
    let lossy = lose_probabilistic(channels.to_vec(), p_loss, rng)?;
    let report = decode_batch_with_count(&lossy.channels, count)?;

    let recovered_bits = report
        .data
        .chunks_exact(DATA_BITS)
        .zip(data.chunks_exact(DATA_BITS))
        .filter(|(got, want)| got == want)
        .count()
        * DATA_BITS;

    Ok(TrialResult {
        total_bits: data.len(),
        recovered_bits,
        lost_channels: lossy.erasures.len(),
    })
}

/// Run a full sweep, calling `on_point` after each probability
pub fn run_sweep<R, F>(
    config: &SweepConfig,
    rng: &mut R,
    mut on_point: F,
) -> Result<Vec<SweepPoint>, CodecError>
where
    R: Rng + ?Sized,
    F: FnMut(&SweepPoint),
{
    let data = random_bits(config.sequence_len, rng);
    let mut points = Vec::with_capacity(config.steps);

    for p_loss in probability_grid(config.steps) {
        let mut total = 0.0;
        for _ in 0..config.trials {
            total += simulate_transmission(&data, p_loss, rng)?.recovery_percent();
        }
        let recovery_percent = if config.trials == 0 {
            0.0
        } else {
            total / config.trials as f64
        };

        let point = SweepPoint {
            p_loss,
            recovery_percent,
        };

        #[cfg(feature = "logging")]
        debug!(
            "p_loss = {:.3}: mean recovery {:.2}%",
            point.p_loss, point.recovery_percent
        );

        on_point(&point);
        points.push(point);
    }

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_endpoints() {
        let grid = probability_grid(21);
        assert_eq!(grid.len(), 21);
        assert_eq!(grid[0], 0.0);
        assert_eq!(grid[20], 1.0);
        assert!((grid[1] - 0.05).abs() < 1e-12);
        assert!(probability_grid(0).is_empty());
    }

    #[test]
    fn test_no_loss_recovers_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = random_bits(400, &mut rng);
        let trial = simulate_transmission(&data, 0.0, &mut rng).unwrap();
        assert_eq!(trial.recovered_bits, 400);
        assert_eq!(trial.lost_channels, 0);
        assert_eq!(trial.recovery_percent(), 100.0);
    }

    #[test]
    fn test_total_loss_recovers_only_zero_blocks() {
        let mut rng = StdRng::seed_from_u64(3);
        let data = vec![1u8; 40];
        let trial = simulate_transmission(&data, 1.0, &mut rng).unwrap();
        assert_eq!(trial.lost_channels, 7);
        assert_eq!(trial.recovered_bits, 0);
    }

    #[test]
    fn test_rejects_partial_block() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(simulate_transmission(&[1, 0, 1], 0.5, &mut rng).is_err());
    }

    #[test]
    fn test_sweep_is_monotone_at_the_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = SweepConfig {
            sequence_len: 64,
            trials: 5,
            steps: 3,
        };
        let mut seen = 0;
        let points = run_sweep(&config, &mut rng, |_| seen += 1).unwrap();
        assert_eq!(seen, 3);
        assert_eq!(points[0].recovery_percent, 100.0);
        assert_eq!(points[2].p_loss, 1.0);
        assert!(points[2].recovery_percent < 100.0);
    }
}
