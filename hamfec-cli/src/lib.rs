//! Library entry for hamfec-cli used by integration tests and embedding.

pub mod commands;

// Re-export commands for convenience
pub use commands::*;

use hamfec_core::loss::LossModel;

/// Loss model applied by the receiver to each complete batch
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LossMode {
    /// Decode what arrived, dropping nothing
    None,
    /// Drop exactly two of the seven channels
    #[default]
    Fixed,
    /// Drop each channel independently with `--probability`
    Probabilistic,
}

impl LossMode {
    /// Core loss model for this mode
    pub fn model(self, probability: f64) -> LossModel {
        match self {
            LossMode::None => LossModel::None,
            LossMode::Fixed => LossModel::Fixed,
            LossMode::Probabilistic => LossModel::Probabilistic(probability),
        }
    }
}
