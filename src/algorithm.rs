//! Digest selection for the prover
//!
//! The core engine is generic over any digest; the prover picks one of
//! the known variants at runtime and dispatches to a typed engine.

use serde::{Deserialize, Serialize};
use tsdiff_core::blake3::Hasher as Blake3;
use tsdiff_core::sha1::Sha1;
use tsdiff_core::sha2::Sha256;
use tsdiff_core::{BLAKE3_SIZE, DifficultyEngine, SHA1_SIZE, SHA256_SIZE};

/// Supported digest variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// SHA-1, 20-byte digest
    #[default]
    Sha1,
    /// SHA-256, 32-byte digest
    Sha256,
    /// BLAKE3, 32-byte digest
    Blake3,
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Sha1 => "sha1",
            Algorithm::Sha256 => "sha256",
            Algorithm::Blake3 => "blake3",
        }
    }

    pub fn digest_size(&self) -> usize {
        match self {
            Algorithm::Sha1 => SHA1_SIZE,
            Algorithm::Sha256 => SHA256_SIZE,
            Algorithm::Blake3 => BLAKE3_SIZE,
        }
    }

    /// Highest reachable difficulty (every digest bit zero)
    pub fn max_difficulty(&self) -> u32 {
        self.digest_size() as u32 * 8
    }

    /// One-shot difficulty of `(identity, counter)`
    pub fn difficulty(&self, identity: &[u8], counter: u64) -> u32 {
        match self {
            Algorithm::Sha1 => tsdiff_core::compute_difficulty::<Sha1>(identity, counter),
            Algorithm::Sha256 => tsdiff_core::compute_difficulty::<Sha256>(identity, counter),
            Algorithm::Blake3 => tsdiff_core::compute_difficulty::<Blake3>(identity, counter),
        }
    }

    /// Engine bound to `identity` for repeated scoring
    pub fn engine(&self, identity: &[u8]) -> Engine {
        match self {
            Algorithm::Sha1 => Engine::Sha1(DifficultyEngine::new(identity)),
            Algorithm::Sha256 => Engine::Sha256(DifficultyEngine::new(identity)),
            Algorithm::Blake3 => Engine::Blake3(DifficultyEngine::new(identity)),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime-selected difficulty engine
#[derive(Clone)]
pub enum Engine {
    Sha1(DifficultyEngine<Sha1>),
    Sha256(DifficultyEngine<Sha256>),
    Blake3(DifficultyEngine<Blake3>),
}

impl Engine {
    #[inline]
    pub fn difficulty(&self, counter: u64) -> u32 {
        match self {
            Engine::Sha1(engine) => engine.difficulty(counter),
            Engine::Sha256(engine) => engine.difficulty(counter),
            Engine::Blake3(engine) => engine.difficulty(counter),
        }
    }

    pub fn identity_len(&self) -> usize {
        match self {
            Engine::Sha1(engine) => engine.identity_len(),
            Engine::Sha256(engine) => engine.identity_len(),
            Engine::Blake3(engine) => engine.identity_len(),
        }
    }
}
