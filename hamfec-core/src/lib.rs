//! # hamfec Core
//!
//! Hamming(7,4) forward error correction with channel interleaving, so that
//! whole lost packets (not just flipped bits) can be recovered.
//!
//! ## Modules
//!
//! - `constants`: Generator / parity-check matrices and fixed sizes
//! - `types`: Core types (DataBlock, Codeword, Syndrome, ErasureSet, ReceivedWord)
//! - `gf2`: Matrix arithmetic mod 2
//! - `codec`: Single-error-correcting encode / decode
//! - `interleave`: Spreading codewords across seven channels and back
//! - `erasure`: Recovery of up to two erased positions per codeword
//! - `loss`: Channel loss models with an injected random source
//! - `wire`: ASCII-digit channel payloads
//! - `batch`: Whole-batch encode / decode and the seven-payload assembler
//! - `simulation`: Loss-probability sweep

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod batch;
pub mod codec;
pub mod constants;
pub mod erasure;
pub mod error;
pub mod gf2;
pub mod interleave;
pub mod loss;
pub mod simulation;
pub mod types;
pub mod wire;

// Re-export commonly used types
pub use codec::{decode, encode};
pub use erasure::{decode_with_erasures, ErasureOutcome};
pub use error::CodecError;
pub use types::{Codeword, DataBlock, ErasureSet, ReceivedWord, Syndrome};

/// Result type alias for hamfec operations
pub type Result<T> = core::result::Result<T, CodecError>;
