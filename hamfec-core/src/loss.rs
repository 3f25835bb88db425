//! Channel loss models
//!
//! Both models take the random source as an argument so callers control
//! seeding. Lost channels come back as `None`.

use crate::constants::{CHANNEL_COUNT, MAX_ERASURES};
use crate::error::CodecError;
use crate::types::ErasureSet;
use alloc::vec::Vec;
use rand::Rng;

#[cfg(feature = "logging")]
use tracing::debug;

/// Channels after loss, plus which ones were lost
#[derive(Debug, Clone, PartialEq)]
pub struct Lossy<T> {
    /// Seven slots; `None` where the channel was lost
    pub channels: Vec<Option<T>>,
    /// Indices of the lost channels
    pub erasures: ErasureSet,
}

/// Which loss model to apply to a batch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LossModel {
    /// Deliver every channel
    None,
    /// Lose exactly two channels, chosen uniformly
    #[default]
    Fixed,
    /// Lose each channel independently with the given probability
    Probabilistic(f64),
}

impl LossModel {
    /// Check the model's parameters before any channel is handed to it
    pub fn validate(&self) -> Result<(), CodecError> {
        match *self {
            LossModel::Probabilistic(p) => check_probability(p),
            LossModel::None | LossModel::Fixed => Ok(()),
        }
    }

    /// Apply this model to a batch of seven channels
    pub fn apply<T, R: Rng + ?Sized>(&self, channels: Vec<T>, rng: &mut R) -> Result<Lossy<T>, CodecError> {
        match *self {
            LossModel::None => lose_indices(channels, ErasureSet::empty()),
            LossModel::Fixed => lose_fixed(channels, rng),
            LossModel::Probabilistic(p) => lose_probabilistic(channels, p, rng),
        }
    }
}

/// Lose exactly two of the seven channels, chosen without replacement
pub fn lose_fixed<T, R: Rng + ?Sized>(channels: Vec<T>, rng: &mut R) -> Result<Lossy<T>, CodecError> {
    check_count(channels.len())?;
    let picked = rand::seq::index::sample(rng, CHANNEL_COUNT, MAX_ERASURES);
    let mut erasures = ErasureSet::empty();
    for index in picked.iter() {
        erasures.insert(index)?;
    }

    #[cfg(feature = "logging")]
    debug!("Fixed loss: dropping channels {:?}", erasures.to_vec());

    lose_indices(channels, erasures)
}

/// Lose each of the seven channels independently with probability `p`
///
/// Any number of channels, including all seven, may be lost.
pub fn lose_probabilistic<T, R: Rng + ?Sized>(
    channels: Vec<T>,
    p: f64,
    rng: &mut R,
) -> Result<Lossy<T>, CodecError> {
    check_count(channels.len())?;
    check_probability(p)?;

    let mut erasures = ErasureSet::empty();
    for index in 0..CHANNEL_COUNT {
        if rng.gen_bool(p) {
            erasures.insert(index)?;
        }
    }

    #[cfg(feature = "logging")]
    debug!("Probabilistic loss (p = {}): dropping channels {:?}", p, erasures.to_vec());

    lose_indices(channels, erasures)
}

/// Replace the channels in `erasures` with `None`
pub fn lose_indices<T>(channels: Vec<T>, erasures: ErasureSet) -> Result<Lossy<T>, CodecError> {
    check_count(channels.len())?;
    let channels = channels
        .into_iter()
        .enumerate()
        .map(|(i, c)| if erasures.contains(i) { None } else { Some(c) })
        .collect();
    Ok(Lossy { channels, erasures })
}

fn check_probability(p: f64) -> Result<(), CodecError> {
    // NaN fails the range check too
    if !(0.0..=1.0).contains(&p) {
        return Err(CodecError::InvalidProbability(p));
    }
    Ok(())
}

fn check_count(actual: usize) -> Result<(), CodecError> {
    if actual != CHANNEL_COUNT {
        return Err(CodecError::length("channel set", CHANNEL_COUNT, actual));
    }
    Ok(())
}
