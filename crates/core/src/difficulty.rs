//! Identity difficulty scoring
//!
//! The hashed message is the identity bytes directly followed by the
//! counter's canonical decimal digits:
//!
//! ```text
//! message = identity || decimal(counter)
//! ```
//!
//! The digest is scanned from its first byte. Every zero byte scores 8;
//! the first non-zero byte scores the number of zero bits below its lowest
//! set bit. An all-zero digest scores `8 * digest_len`.

use digest::Digest;

use crate::counter::encode_counter;
use crate::error::PhaseError;
use crate::phase::{is_slow_phase, its_until_slow_phase};

/// Difficulty score of an already computed digest
///
/// # Example
///
/// ```rust
/// use tsdiff_core::digest_difficulty;
///
/// // 0x00 0x00 then 0b0000_1100: 8 + 8 + 2
/// assert_eq!(digest_difficulty(&[0x00, 0x00, 0x0C, 0xFF]), 18);
/// assert_eq!(digest_difficulty(&[0x01, 0x00]), 0);
/// assert_eq!(digest_difficulty(&[0x00; 20]), 160);
/// ```
#[inline]
pub fn digest_difficulty(digest: &[u8]) -> u32 {
    let mut zero_bits = 0u32;

    for byte in digest {
        if *byte == 0 {
            zero_bits += 8;
        } else {
            zero_bits += byte.trailing_zeros();
            break;
        }
    }

    zero_bits
}

/// Check if a digest reaches the target difficulty
#[inline]
pub fn meets_difficulty(digest: &[u8], target: u32) -> bool {
    digest_difficulty(digest) >= target
}

/// Difficulty of `(identity, counter)` under digest `D`
///
/// # Example
///
/// ```rust
/// use tsdiff_core::compute_difficulty;
/// use tsdiff_core::sha2::Sha256;
///
/// // SHA-256("abc0") starts with 0x56
/// assert_eq!(compute_difficulty::<Sha256>(b"abc", 0), 1);
/// ```
pub fn compute_difficulty<D: Digest>(identity: &[u8], counter: u64) -> u32 {
    let mut hasher = D::new();
    hasher.update(identity);
    hasher.update(encode_counter(counter));
    digest_difficulty(&hasher.finalize())
}

/// Difficulty engine bound to one identity
///
/// The identity is fed into the digest once; every counter then resumes
/// from a clone of that prefix state. Scores are identical to
/// [`compute_difficulty`].
#[derive(Clone)]
pub struct DifficultyEngine<D: Digest + Clone> {
    /// Digest state after absorbing the identity
    prefix: D,
    identity_len: usize,
}

impl<D: Digest + Clone> DifficultyEngine<D> {
    /// Create an engine for `identity`
    pub fn new(identity: &[u8]) -> Self {
        let mut prefix = D::new();
        prefix.update(identity);
        Self {
            prefix,
            identity_len: identity.len(),
        }
    }

    /// Byte length of the bound identity
    #[inline]
    pub fn identity_len(&self) -> usize {
        self.identity_len
    }

    /// Digest size in bytes
    #[inline]
    pub fn digest_size(&self) -> usize {
        <D as Digest>::output_size()
    }

    /// Highest score this engine can produce
    #[inline]
    pub fn max_difficulty(&self) -> u32 {
        (self.digest_size() as u32) * 8
    }

    /// Difficulty of the bound identity at `counter`
    #[inline]
    pub fn difficulty(&self, counter: u64) -> u32 {
        let mut hasher = self.prefix.clone();
        hasher.update(encode_counter(counter));
        digest_difficulty(&hasher.finalize())
    }

    /// See [`is_slow_phase`]
    #[inline]
    pub fn is_slow_phase(&self, counter: u64) -> bool {
        is_slow_phase(self.identity_len, counter)
    }

    /// See [`its_until_slow_phase`]
    #[inline]
    pub fn its_until_slow_phase(&self, counter: u64) -> Result<u64, PhaseError> {
        its_until_slow_phase(self.identity_len, counter)
    }
}

/// SHA-1 engine (20-byte digest)
pub type Sha1Engine = DifficultyEngine<sha1::Sha1>;

/// SHA-256 engine (32-byte digest)
pub type Sha256Engine = DifficultyEngine<sha2::Sha256>;

/// BLAKE3 engine (32-byte digest)
#[cfg(feature = "blake3")]
pub type Blake3Engine = DifficultyEngine<blake3::Hasher>;
