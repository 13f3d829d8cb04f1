//! # tsdiff Core
//!
//! Hashcash-style difficulty scoring for an `(identity, counter)` pair and
//! the length-budget arithmetic that decides when a counter leaves the
//! fixed-width fast phase.
//!
//! ## Message Format
//!
//! ```text
//! message = identity || decimal(counter)
//!           ^^^^^^^^    ^^^^^^^^^^^^^^^^
//!           raw bytes   canonical base-10 ASCII, no separator
//! ```
//!
//! The score is the number of zero bytes at the front of the digest times
//! eight, plus the zero bits below the lowest set bit of the first non-zero
//! byte.
//!
//! ## Phases
//!
//! Identity, counter digits and 9 reserved bytes share a 128-byte budget.
//! A counter whose digits overflow the budget is in the slow phase.
//!
//! ## Example
//!
//! ```rust
//! use tsdiff_core::sha1::Sha1;
//! use tsdiff_core::{DifficultyEngine, compute_difficulty, is_slow_phase};
//!
//! // One-shot scoring with any RustCrypto digest
//! let score = compute_difficulty::<Sha1>(b"identity", 1234);
//!
//! // Reusable engine (absorbs the identity once)
//! let engine = DifficultyEngine::<Sha1>::new(b"identity");
//! assert_eq!(engine.difficulty(1234), score);
//!
//! assert!(!is_slow_phase(8, 1234));
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! tsdiff-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
extern crate alloc;

mod counter;
mod difficulty;
mod error;
mod params;
mod phase;

#[cfg(feature = "std")]
mod ffi;

pub use counter::{DecimalCounter, decimal_length, encode_counter, its_constant_counter_length};
pub use difficulty::{
    DifficultyEngine, Sha1Engine, Sha256Engine, compute_difficulty, digest_difficulty,
    meets_difficulty,
};
pub use error::PhaseError;
pub use params::*;
pub use phase::{is_slow_phase, its_until_slow_phase};

#[cfg(feature = "blake3")]
pub use difficulty::Blake3Engine;

pub use digest;
pub use sha1;
pub use sha2;

#[cfg(feature = "blake3")]
pub use blake3;

#[cfg(test)]
mod tests;
